use std::time::{Duration, Instant};

use rand::seq::SliceRandom;
use rand::Rng;

use super::types::Roster;

/// How long the repair loop runs by default.
pub const DEFAULT_REPAIR_BUDGET: Duration = Duration::from_secs(10);

/// How many iterations run between elapsed-time checks. Sampling moves is much
/// cheaper than reading the clock, so the loop may overrun the budget by up to
/// one batch.
const CLOCK_CHECK_INTERVAL: u64 = 100;

/// Exchanges one timeframe each way between two people.
///
/// `a` hands over a timeframe that `b` marked available but does not hold, and
/// takes one of `b`'s on the same terms. Succeeds only when both directions
/// have a candidate; otherwise nothing changes. Both people keep their
/// assignment counts, and every touched timeframe keeps its headcount.
pub fn swap(roster: &mut Roster, a: &str, b: &str) -> bool {
    let a_to_b = movable_timeframe(roster, a, b);
    let b_to_a = movable_timeframe(roster, b, a);
    match (a_to_b, b_to_a) {
        (Some(from_a), Some(from_b)) => {
            roster.unassign(a, &from_a);
            roster.unassign(b, &from_b);
            roster.assign(a, &from_b);
            roster.assign(b, &from_a);
            true
        }
        _ => false,
    }
}

/// Hands one of `sender`'s timeframes to `receiver`, if `receiver` marked it
/// available and does not already hold it. Sender's count drops by one,
/// receiver's rises by one, the timeframe's headcount is unchanged.
pub fn transfer(roster: &mut Roster, sender: &str, receiver: &str) -> bool {
    match movable_timeframe(roster, sender, receiver) {
        Some(frame) => {
            roster.unassign(sender, &frame);
            roster.assign(receiver, &frame);
            true
        }
        None => false,
    }
}

/// First timeframe (in set order) held by `from` that `to` could take over.
fn movable_timeframe(roster: &Roster, from: &str, to: &str) -> Option<String> {
    let from_person = roster.person(from)?;
    let to_person = roster.person(to)?;
    from_person
        .scheduled()
        .iter()
        .find(|frame| {
            !to_person.scheduled().contains(frame.as_str())
                && to_person.available().contains(frame.as_str())
        })
        .cloned()
}

/// Tops an under-capacity timeframe up toward `required` using people who
/// marked it available but are not scheduled in it. Purely additive; this can
/// push a person past the share the greedy pass gave them.
pub fn gap_fill(roster: &mut Roster, timeframe: &str, required: usize) {
    loop {
        let candidate = match roster.timeframe(timeframe) {
            Some(frame) if frame.scheduled_count() < required => frame
                .available()
                .iter()
                .find(|person| !frame.scheduled().contains(person.as_str()))
                .cloned(),
            _ => None,
        };
        match candidate {
            Some(person) => roster.assign(&person, timeframe),
            None => break,
        }
    }
}

/// Nudges two people's loads toward each other: equal loads trade timeframes,
/// unequal loads shift one timeframe from the heavier to the lighter person.
/// Same person twice, or no feasible move, is a no-op.
pub fn balance(roster: &mut Roster, a: &str, b: &str) -> bool {
    if a == b {
        return false;
    }
    let a_count = roster.person(a).map_or(0, |p| p.scheduled_count());
    let b_count = roster.person(b).map_or(0, |p| p.scheduled_count());
    if a_count == b_count {
        swap(roster, a, b)
    } else if a_count > b_count {
        transfer(roster, a, b)
    } else {
        transfer(roster, b, a)
    }
}

/// Randomized repair loop: for the given wall-clock budget, keep sampling
/// either a balance move between two random people (4 times out of 5) or a
/// gap fill on a random timeframe (1 time out of 5).
///
/// There is no objective score and no best-so-far snapshot; every move either
/// preserves feasibility or does nothing, so whatever state the clock runs out
/// on is the final schedule. Move selection is unseeded, so two runs over the
/// same survey may produce different (equally valid) schedules.
pub fn repair_schedule(roster: &mut Roster, required: usize, budget: Duration) {
    let person_names = roster.person_names();
    let frame_names = roster.timeframe_names();
    if person_names.is_empty() || frame_names.is_empty() {
        return;
    }

    let start = Instant::now();
    let mut rng = rand::thread_rng();
    let mut iterations: u64 = 0;
    loop {
        iterations += 1;
        if iterations % CLOCK_CHECK_INTERVAL == 0 && start.elapsed() > budget {
            break;
        }
        if rng.gen_range(0..5) == 0 {
            if let Some(frame) = frame_names.choose(&mut rng) {
                gap_fill(roster, frame, required);
            }
        } else {
            let a = person_names.choose(&mut rng);
            let b = person_names.choose(&mut rng);
            if let (Some(a), Some(b)) = (a, b) {
                balance(roster, a, b);
            }
        }
    }
}
