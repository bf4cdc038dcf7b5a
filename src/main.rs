mod display;
mod parser;
mod schedule;

use std::io::{self, Write};
use std::time::Duration;

use schedule::{build_initial_schedule, repair_schedule, DEFAULT_REPAIR_BUDGET};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // shift-roster [CSV_PATH] [PEOPLE_PER_TIMEFRAME] [BALANCE_SECONDS]
    let args: Vec<String> = std::env::args().collect();
    let csv_path = args.get(1).map(String::as_str).unwrap_or("chouseisan.csv");
    let required = match args.get(2) {
        Some(raw) => parse_required(raw)?,
        None => prompt_required()?,
    };
    let budget = match args.get(3) {
        Some(raw) => Duration::from_secs(parse_budget(raw)?),
        None => DEFAULT_REPAIR_BUDGET,
    };

    println!("Loading survey from {}...", csv_path);
    let mut roster = parser::load_survey(csv_path)?;
    println!(
        "Loaded {} people across {} timeframes",
        roster.person_count(),
        roster.timeframe_count()
    );

    build_initial_schedule(&mut roster, required);
    println!("Balancing assignments for {}s...", budget.as_secs());
    repair_schedule(&mut roster, required, budget);

    let (persons_path, timeframes_path) = display::write_schedule_files(&roster)?;
    display::print_summary(&roster, required);
    println!("\nSchedules saved to:");
    println!("  - {}", persons_path.display());
    println!("  - {}", timeframes_path.display());

    Ok(())
}

/// Parses the people-per-timeframe count. Anything that is not a positive
/// whole number is rejected before any survey data is touched.
fn parse_required(raw: &str) -> Result<usize, String> {
    match raw.trim().parse::<usize>() {
        Ok(count) if count >= 1 => Ok(count),
        _ => Err(format!(
            "people per timeframe must be a positive whole number, got {:?}",
            raw.trim()
        )),
    }
}

fn parse_budget(raw: &str) -> Result<u64, String> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| format!("balance seconds must be a whole number, got {:?}", raw.trim()))
}

fn prompt_required() -> Result<usize, Box<dyn std::error::Error>> {
    print!("People needed per timeframe: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(parse_required(&line)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_count_accepts_positive_numbers() {
        assert_eq!(parse_required("3").unwrap(), 3);
        assert_eq!(parse_required(" 12 \n").unwrap(), 12);
    }

    #[test]
    fn required_count_rejects_zero_and_garbage() {
        assert!(parse_required("0").is_err());
        assert!(parse_required("-2").is_err());
        assert!(parse_required("two").is_err());
        assert!(parse_required("").is_err());
    }

    #[test]
    fn budget_parses_seconds() {
        assert_eq!(parse_budget("30").unwrap(), 30);
        assert!(parse_budget("soon").is_err());
    }

    #[test]
    fn pipeline_staffs_a_survey_end_to_end() {
        let raw = "\
July shifts
日程,alice,bob,carol
7/1,◯,◯,×
7/2,◯,×,◯
7/3,×,◯,◯
コメント,a,b,c
";
        let mut roster = parser::parse_survey(raw).unwrap();
        build_initial_schedule(&mut roster, 1);
        repair_schedule(&mut roster, 1, Duration::from_millis(20));

        // two candidates per timeframe is plenty for one seat each, and the
        // repair moves all preserve per-timeframe headcounts
        for frame in roster.timeframes() {
            assert_eq!(frame.scheduled_count(), 1);
        }
        let table = display::person_table(&roster);
        assert_eq!(table.len(), 3);
    }
}
