use std::error::Error;
use std::path::{Path, PathBuf};

use chrono::Local;
use csv::WriterBuilder;

use crate::schedule::Roster;

/// One output table: a row key plus its padded cells, in output row order.
pub type Table = Vec<(String, Vec<String>)>;

/// Builds the per-person table: one row per person (name order), cells are
/// that person's timeframes sorted back into survey order, right-padded with
/// empty cells so every row has the same width.
pub fn person_table(roster: &Roster) -> Table {
    let mut rows: Table = roster
        .persons()
        .map(|person| {
            let mut frames: Vec<_> = person
                .scheduled()
                .iter()
                .filter_map(|name| roster.timeframe(name))
                .collect();
            frames.sort_by_key(|frame| frame.ordinal());
            let cells = frames.iter().map(|frame| frame.name().to_string()).collect();
            (person.name().to_string(), cells)
        })
        .collect();
    pad_rows(&mut rows);
    rows
}

/// Builds the per-timeframe table: one row per timeframe (survey order), cells
/// are the scheduled people sorted by their comment rather than their name,
/// right-padded like the person table. The two tables pad independently.
pub fn timeframe_table(roster: &Roster) -> Table {
    let mut frames: Vec<_> = roster.timeframes().collect();
    frames.sort_by_key(|frame| frame.ordinal());
    let mut rows: Table = frames
        .iter()
        .map(|frame| {
            let mut people: Vec<_> = frame
                .scheduled()
                .iter()
                .filter_map(|name| roster.person(name))
                .collect();
            // comment is the sort key; ties fall back to name so output is stable
            people.sort_by(|a, b| a.comment().cmp(b.comment()).then(a.name().cmp(b.name())));
            let cells = people.iter().map(|person| person.name().to_string()).collect();
            (frame.name().to_string(), cells)
        })
        .collect();
    pad_rows(&mut rows);
    rows
}

fn pad_rows(rows: &mut Table) {
    let width = rows.iter().map(|(_, cells)| cells.len()).max().unwrap_or(0);
    for (_, cells) in rows.iter_mut() {
        cells.resize(width, String::new());
    }
}

/// Writes a table as headerless CSV, row key first.
pub fn write_table<P: AsRef<Path>>(path: P, table: &Table) -> Result<(), Box<dyn Error>> {
    let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;
    for (key, cells) in table {
        let mut record = vec![key.as_str()];
        record.extend(cells.iter().map(String::as_str));
        writer.write_record(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes both schedule tables next to the working directory, file names
/// stamped with the generation time so reruns never overwrite earlier output.
/// Returns the two paths written.
pub fn write_schedule_files(roster: &Roster) -> Result<(PathBuf, PathBuf), Box<dyn Error>> {
    let stamp = Local::now().format("%Y%m%d-%H%M%S");
    let persons_path = PathBuf::from(format!("{}_persons_shift.csv", stamp));
    let timeframes_path = PathBuf::from(format!("{}_timeframes_shift.csv", stamp));
    write_table(&persons_path, &person_table(roster))?;
    write_table(&timeframes_path, &timeframe_table(roster))?;
    Ok((persons_path, timeframes_path))
}

/// Prints a coverage summary: per-timeframe headcounts with an explicit list
/// of timeframes that ended under target, and each person's final load.
pub fn print_summary(roster: &Roster, required: usize) {
    println!("\n=== Shift Coverage ===");

    let mut frames: Vec<_> = roster.timeframes().collect();
    frames.sort_by_key(|frame| frame.ordinal());

    let short: Vec<_> = frames
        .iter()
        .filter(|frame| frame.scheduled_count() < required)
        .collect();
    if !short.is_empty() {
        println!("⚠️  Timeframes under target ({}):", short.len());
        for frame in &short {
            println!(
                "  - {} ({}/{} scheduled, {} available)",
                frame.name(),
                frame.scheduled_count(),
                required,
                frame.available_count()
            );
        }
    }

    println!("\nAssignments per timeframe:");
    for frame in &frames {
        let names: Vec<&str> = frame.scheduled().iter().map(String::as_str).collect();
        println!(
            "  {} -> {}/{}: {}",
            frame.name(),
            frame.scheduled_count(),
            required,
            names.join(", ")
        );
    }

    println!("\nAssignments per person:");
    for person in roster.persons() {
        println!("  {} -> {} shift(s)", person.name(), person.scheduled_count());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_roster() -> Roster {
        let mut roster = Roster::new();
        // names deliberately out of step with survey order
        roster.insert_timeframe("z-early", 0);
        roster.insert_timeframe("a-late", 1);
        for frame in ["z-early", "a-late"] {
            roster.mark_available("alice", "morning person", frame);
            roster.mark_available("bob", "anything works", frame);
        }
        roster.assign("alice", "z-early");
        roster.assign("alice", "a-late");
        roster.assign("bob", "z-early");
        roster
    }

    #[test]
    fn person_rows_follow_survey_order_not_name_order() {
        let table = person_table(&sample_roster());
        let alice = &table[0];
        assert_eq!(alice.0, "alice");
        assert_eq!(alice.1, vec!["z-early".to_string(), "a-late".to_string()]);
    }

    #[test]
    fn person_rows_are_padded_to_the_widest_row() {
        let table = person_table(&sample_roster());
        let bob = &table[1];
        assert_eq!(bob.0, "bob");
        assert_eq!(bob.1, vec!["z-early".to_string(), String::new()]);
    }

    #[test]
    fn timeframe_rows_keep_survey_order_and_sort_people_by_comment() {
        let table = timeframe_table(&sample_roster());
        assert_eq!(table[0].0, "z-early");
        assert_eq!(table[1].0, "a-late");
        // "anything works" < "morning person", so bob leads despite the names
        assert_eq!(
            table[0].1,
            vec!["bob".to_string(), "alice".to_string()]
        );
        assert_eq!(table[1].1, vec!["alice".to_string(), String::new()]);
    }

    #[test]
    fn tables_are_stable_across_repeated_materialization() {
        let roster = sample_roster();
        assert_eq!(person_table(&roster), person_table(&roster));
        assert_eq!(timeframe_table(&roster), timeframe_table(&roster));
    }

    #[test]
    fn empty_roster_produces_empty_tables() {
        let roster = Roster::new();
        assert!(person_table(&roster).is_empty());
        assert!(timeframe_table(&roster).is_empty());
    }

    #[test]
    fn written_table_round_trips_keys_and_cell_order() {
        let table = person_table(&sample_roster());
        let path = std::env::temp_dir().join(format!(
            "shift-roster-test-{}.csv",
            std::process::id()
        ));
        write_table(&path, &table).unwrap();

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(&path)
            .unwrap();
        let rows: Vec<Vec<String>> = reader
            .records()
            .map(|r| r.unwrap().iter().map(|c| c.to_string()).collect())
            .collect();
        std::fs::remove_file(&path).ok();

        assert_eq!(rows.len(), table.len());
        for (row, (key, cells)) in rows.iter().zip(&table) {
            assert_eq!(&row[0], key);
            assert_eq!(&row[1..], cells.as_slice());
        }
    }
}
