use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::csv_row::lossy_lines;
use crate::dates::{format_entry_date, parse_entry_date};
use crate::models::{WeightEntry, validate_weight};

/// Upper bound on entries read back from the log.
pub const MAX_WEIGHT_ENTRIES: usize = 1000;

/// Append-only `DD-MM-YYYY,weight_kg` log.
#[derive(Debug, Clone)]
pub struct WeightLog {
    path: PathBuf,
}

impl WeightLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, entry: &WeightEntry) -> Result<()> {
        validate_weight(entry.weight_kg)?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Could not open weight log: {}", self.path.display()))?;

        let date = format_entry_date(entry.date);
        let weight = format!("{:.2}", entry.weight_kg);
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        wtr.write_record([date.as_str(), weight.as_str()])?;
        wtr.flush()
            .with_context(|| format!("Failed to write weight log: {}", self.path.display()))?;

        debug!(date = %date, weight = %weight, "appended weight entry");
        Ok(())
    }

    /// Entries in file order, capped at [`MAX_WEIGHT_ENTRIES`]. A missing log is empty.
    pub fn load_all(&self) -> Result<Vec<WeightEntry>> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Could not open weight log: {}", self.path.display())
                });
            }
        };

        let mut entries = Vec::new();
        for (idx, line) in lossy_lines(BufReader::new(file)).enumerate() {
            let line = line
                .with_context(|| format!("Failed to read weight log: {}", self.path.display()))?;
            if line.trim().is_empty() {
                continue;
            }
            if entries.len() >= MAX_WEIGHT_ENTRIES {
                warn!(
                    max = MAX_WEIGHT_ENTRIES,
                    "weight log has more entries than can be loaded; ignoring the rest"
                );
                break;
            }

            match parse_weight_line(&line) {
                Some(entry) => entries.push(entry),
                None => warn!(line = idx + 1, "skipping malformed weight entry"),
            }
        }

        Ok(entries)
    }

    /// Load and sort in one step.
    pub fn load_sorted(&self) -> Result<Vec<WeightEntry>> {
        let mut entries = self.load_all()?;
        sort_by_date(&mut entries);
        Ok(entries)
    }
}

/// `DD-MM-YYYY,weight_kg` with a real date and a positive weight.
fn parse_weight_line(line: &str) -> Option<WeightEntry> {
    let (date, weight) = line.split_once(',')?;
    let date = parse_entry_date(date.trim())?;
    let weight_kg = weight.trim().parse::<f64>().ok()?;
    WeightEntry::new(date, weight_kg).ok()
}

/// Stable ascending sort by calendar date.
pub fn sort_by_date(entries: &mut [WeightEntry]) {
    entries.sort_by_key(|e| e.date);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trend {
    Lost(f64),
    Gained(f64),
    Stable,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Lost(kg) => write!(f, "LOST {kg:.1} kg"),
            Trend::Gained(kg) => write!(f, "GAINED {kg:.1} kg"),
            Trend::Stable => f.write_str("STABLE"),
        }
    }
}

/// Change between the two most recent entries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub previous: WeightEntry,
    pub latest: WeightEntry,
    pub trend: Trend,
}

impl Progress {
    /// Signed change in kg, rounded to the precision the log stores.
    #[must_use]
    pub fn difference(&self) -> f64 {
        round_to_hundredths(self.latest.weight_kg - self.previous.weight_kg)
    }
}

/// Compare the two latest entries by date. Needs at least two entries.
#[must_use]
pub fn progress_report(entries: &[WeightEntry]) -> Option<Progress> {
    if entries.len() < 2 {
        return None;
    }

    let mut sorted = entries.to_vec();
    sort_by_date(&mut sorted);
    let latest = sorted[sorted.len() - 1];
    let previous = sorted[sorted.len() - 2];

    let mut progress = Progress {
        previous,
        latest,
        trend: Trend::Stable,
    };
    let diff = progress.difference();
    if diff < 0.0 {
        progress.trend = Trend::Lost(-diff);
    } else if diff > 0.0 {
        progress.trend = Trend::Gained(diff);
    }
    Some(progress)
}

fn round_to_hundredths(v: f64) -> f64 {
    let rounded = (v * 100.0).round() / 100.0;
    if rounded == 0.0 { 0.0 } else { rounded }
}
