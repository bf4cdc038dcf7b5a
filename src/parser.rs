use std::fs;
use std::path::Path;

use csv::ReaderBuilder;
use thiserror::Error;

use crate::schedule::Roster;

/// Row key of the one non-slot row, whose cells hold each person's free-text
/// comment instead of availability marks.
const COMMENT_ROW: &str = "コメント";

/// Cell contents that count as "available". Chouseisan exports use a handful
/// of circle glyphs depending on the client that filled the survey in.
const AVAILABLE_MARKS: [&str; 2] = ["◯", "○"];

/// Cell contents that count as "not available".
const UNAVAILABLE_MARKS: [&str; 4] = ["", "△", "×", "✕"];

#[derive(Debug, Error)]
pub enum SurveyError {
    #[error("could not read survey file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse survey file: {0}")]
    Csv(#[from] csv::Error),
    #[error("survey has no timeframe rows")]
    EmptyTable,
    #[error("survey row {0:?} appears more than once")]
    DuplicateRow(String),
    #[error("survey has availability marks but no comment row")]
    MissingCommentRow,
    #[error("row {row:?} has {cells} answer cells but the header names {people} people")]
    RaggedRow {
        row: String,
        cells: usize,
        people: usize,
    },
    #[error("unrecognized availability mark {mark:?} for {person:?} in row {row:?}")]
    UnrecognizedMark {
        row: String,
        person: String,
        mark: String,
    },
}

/// Loads a chouseisan survey export and aggregates it into a `Roster`.
pub fn load_survey<P: AsRef<Path>>(path: P) -> Result<Roster, SurveyError> {
    let raw = fs::read_to_string(path)?;
    parse_survey(&raw)
}

/// Parses survey text: a title line, a header row naming the people, one row
/// per timeframe with an availability mark per person, and a comment row.
///
/// A person only exists in the roster once they have at least one available
/// mark; everyone materialized that way gets their comment from the comment
/// row. Rows keep their file order as the timeframe ordinal.
pub fn parse_survey(raw: &str) -> Result<Roster, SurveyError> {
    // Exports lead with a survey-title line; the real header is line two.
    let body = match raw.split_once('\n') {
        Some((_, rest)) => rest,
        None => return Err(SurveyError::EmptyTable),
    };

    let mut reader = ReaderBuilder::new().flexible(true).from_reader(body.as_bytes());
    let header = reader.headers()?.clone();
    let people: Vec<String> = header.iter().skip(1).map(|h| h.trim().to_string()).collect();

    // First sweep: pull the rows apart into timeframe rows and the comment row,
    // keeping each row's position for the ordinal.
    let mut frame_rows: Vec<(usize, String, Vec<String>)> = Vec::new();
    let mut comments: Option<Vec<String>> = None;
    for (ordinal, record) in reader.records().enumerate() {
        let record = record?;
        let row_name = record.get(0).unwrap_or("").trim().to_string();
        let cells: Vec<String> = record
            .iter()
            .skip(1)
            .map(|c| c.trim().to_string())
            .collect();
        if cells.len() != people.len() {
            return Err(SurveyError::RaggedRow {
                row: row_name,
                cells: cells.len(),
                people: people.len(),
            });
        }
        if row_name == COMMENT_ROW {
            if comments.is_some() {
                return Err(SurveyError::DuplicateRow(row_name));
            }
            comments = Some(cells);
        } else {
            if frame_rows.iter().any(|(_, name, _)| *name == row_name) {
                return Err(SurveyError::DuplicateRow(row_name));
            }
            frame_rows.push((ordinal, row_name, cells));
        }
    }

    if frame_rows.is_empty() {
        return Err(SurveyError::EmptyTable);
    }

    let mut roster = Roster::new();
    for (ordinal, row_name, _) in &frame_rows {
        roster.insert_timeframe(row_name, *ordinal);
    }
    for (_, row_name, cells) in &frame_rows {
        for (index, cell) in cells.iter().enumerate() {
            let person = &people[index];
            if !is_available_mark(cell).ok_or_else(|| SurveyError::UnrecognizedMark {
                row: row_name.clone(),
                person: person.clone(),
                mark: cell.clone(),
            })? {
                continue;
            }
            let comment = match &comments {
                Some(cells) => cells.get(index).map(String::as_str).unwrap_or(""),
                None => return Err(SurveyError::MissingCommentRow),
            };
            roster.mark_available(person, comment, row_name);
        }
    }

    Ok(roster)
}

/// Some(true) for an available mark, Some(false) for a not-available mark,
/// None for anything else.
fn is_available_mark(cell: &str) -> Option<bool> {
    if AVAILABLE_MARKS.contains(&cell) {
        Some(true)
    } else if UNAVAILABLE_MARKS.contains(&cell) {
        Some(false)
    } else {
        None
    }
}
