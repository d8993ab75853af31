// src/ingest.rs
//! Typed CSV record ingest.
//!
//! Upstream collaborators (tracker export, dump scraping) hand over
//! plain headered CSV. Rows missing a required field, or carrying an
//! unparseable date or period, are skipped and counted rather than
//! failing the run.

use std::io::Read;

use chrono::NaiveDateTime;

use crate::error::Result;

/// One (bug, developer) participation record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participation {
    pub bug_id: String,
    pub author: String,
}

/// First/last comment timestamps for one bug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub bug_id: String,
    pub first: NaiveDateTime,
    pub last: NaiveDateTime,
}

/// A bug's assigned period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub bug_id: String,
    pub period: u32,
}

/// Row accounting for one ingest pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub read: usize,
    pub skipped: usize,
}

impl IngestStats {
    fn keep(&mut self) {
        self.read += 1;
    }

    fn skip(&mut self) {
        self.skipped += 1;
    }
}

/// Reads `bug_id, comment_author` participation records.
///
/// # Errors
/// Returns an error if the CSV itself is unreadable; bad rows are
/// counted in [`IngestStats::skipped`] instead.
pub fn read_participation<R: Read>(reader: R) -> Result<(Vec<Participation>, IngestStats)> {
    let mut csv = csv::Reader::from_reader(reader);
    let bug_col = column(&mut csv, "bug_id")?;
    let author_col = column(&mut csv, "comment_author")?;

    let mut records = Vec::new();
    let mut stats = IngestStats::default();
    for row in csv.records() {
        let row = row?;
        match (field(&row, bug_col), field(&row, author_col)) {
            (Some(bug_id), Some(author)) => {
                stats.keep();
                records.push(Participation {
                    bug_id: bug_id.to_string(),
                    author: author.to_string(),
                });
            }
            _ => stats.skip(),
        }
    }
    Ok((records, stats))
}

/// Reads `bug_id, first_comment_date, last_comment_date` activity rows,
/// parsing both dates with `date_format`.
///
/// # Errors
/// Returns an error if the CSV itself is unreadable.
pub fn read_activity<R: Read>(
    reader: R,
    date_format: &str,
) -> Result<(Vec<Activity>, IngestStats)> {
    let mut csv = csv::Reader::from_reader(reader);
    let bug_col = column(&mut csv, "bug_id")?;
    let first_col = column(&mut csv, "first_comment_date")?;
    let last_col = column(&mut csv, "last_comment_date")?;

    let mut records = Vec::new();
    let mut stats = IngestStats::default();
    for row in csv.records() {
        let row = row?;
        let parsed = field(&row, bug_col).and_then(|bug_id| {
            let first = parse_date(field(&row, first_col)?, date_format)?;
            let last = parse_date(field(&row, last_col)?, date_format)?;
            Some(Activity {
                bug_id: bug_id.to_string(),
                first,
                last,
            })
        });
        match parsed {
            Some(activity) => {
                stats.keep();
                records.push(activity);
            }
            None => stats.skip(),
        }
    }
    Ok((records, stats))
}

/// Reads `bug_id, period` assignment rows.
///
/// # Errors
/// Returns an error if the CSV itself is unreadable.
pub fn read_assignments<R: Read>(reader: R) -> Result<(Vec<Assignment>, IngestStats)> {
    let mut csv = csv::Reader::from_reader(reader);
    let bug_col = column(&mut csv, "bug_id")?;
    let period_col = column(&mut csv, "period")?;

    let mut records = Vec::new();
    let mut stats = IngestStats::default();
    for row in csv.records() {
        let row = row?;
        let parsed = field(&row, bug_col).and_then(|bug_id| {
            let period = field(&row, period_col)?.parse::<u32>().ok()?;
            Some(Assignment {
                bug_id: bug_id.to_string(),
                period,
            })
        });
        match parsed {
            Some(assignment) => {
                stats.keep();
                records.push(assignment);
            }
            None => stats.skip(),
        }
    }
    Ok((records, stats))
}

fn column<R: Read>(csv: &mut csv::Reader<R>, name: &str) -> Result<usize> {
    let headers = csv.headers()?;
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| crate::error::MinerError::Other(format!("missing CSV column '{name}'")))
}

fn field<'r>(row: &'r csv::StringRecord, idx: usize) -> Option<&'r str> {
    row.get(idx).map(str::trim).filter(|v| !v.is_empty())
}

fn parse_date(value: &str, format: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, format).ok()
}
