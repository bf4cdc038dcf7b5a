use super::types::Roster;

/// Builds the initial assignment with a one-pass greedy, most-constrained
/// people first, then tops up any timeframe still under capacity.
///
/// People with the fewest marked timeframes pick first so they are not starved
/// by flexible people. Each person's share of the outstanding demand is
/// recomputed as `ceil(remaining / people left)` right before their turn.
/// Ties in availability count break by name, ascending; that ordering plus the
/// lexicographic set iteration makes the whole pass deterministic.
///
/// A timeframe never exceeds `required` people. If availability is too thin,
/// some timeframes simply end under capacity; that is a reportable outcome,
/// not an error.
pub fn build_initial_schedule(roster: &mut Roster, required: usize) {
    let mut remaining = required * roster.timeframe_count();

    // Ascending (availability count, name)
    let mut order: Vec<(usize, String)> = roster
        .persons()
        .map(|p| (p.available_count(), p.name().to_string()))
        .collect();
    order.sort();

    let total = order.len();
    for (index, (_, name)) in order.iter().enumerate() {
        let need = div_ceil(remaining, total - index);
        let available = match roster.person(name) {
            Some(person) => person.available().iter().cloned().collect::<Vec<_>>(),
            None => continue,
        };
        for frame_name in available {
            if let Some(frame) = roster.timeframe(&frame_name) {
                if frame.scheduled_count() < required {
                    roster.assign(name, &frame_name);
                    remaining -= 1;
                }
            }
            if roster.person(name).map_or(0, |p| p.scheduled_count()) >= need {
                break;
            }
        }
    }

    // Top-up: fill whatever the fair-share pass left under capacity, even if
    // that pushes someone past their share.
    for frame_name in roster.timeframe_names() {
        let candidates: Vec<String> = match roster.timeframe(&frame_name) {
            Some(frame) => frame.available().iter().cloned().collect(),
            None => continue,
        };
        for person_name in candidates {
            let count = roster
                .timeframe(&frame_name)
                .map_or(0, |f| f.scheduled_count());
            if count >= required {
                break;
            }
            roster.assign(&person_name, &frame_name);
        }
    }
}

fn div_ceil(a: usize, b: usize) -> usize {
    if b == 0 {
        return 0;
    }
    (a + b - 1) / b
}
