use std::fs::{File, OpenOptions};
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{debug, warn};

use crate::csv_row::lossy_lines;
use crate::dates::{current_date, current_timestamp};
use crate::models::{WaterRecord, date_prefix, validate_water_amount};

pub const DAILY_GOAL_ML: u32 = 2500;

/// How water records are stamped when they are logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WaterGranularity {
    /// `YYYY-MM-DD`
    Date,
    /// `YYYY-MM-DD HH:MM`
    #[default]
    Timestamp,
}

impl WaterGranularity {
    #[must_use]
    pub fn stamp_now(self) -> String {
        match self {
            WaterGranularity::Date => current_date(),
            WaterGranularity::Timestamp => current_timestamp(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaterStatus {
    GoalReached,
    Remaining(u64),
}

impl WaterStatus {
    #[must_use]
    pub fn for_total(total_ml: u64) -> Self {
        let goal = u64::from(DAILY_GOAL_ML);
        if total_ml >= goal {
            WaterStatus::GoalReached
        } else {
            WaterStatus::Remaining(goal - total_ml)
        }
    }
}

/// Append-only `timestamp,amount_ml` log.
#[derive(Debug, Clone)]
pub struct WaterLog {
    path: PathBuf,
    granularity: WaterGranularity,
}

impl WaterLog {
    pub fn new(path: impl Into<PathBuf>, granularity: WaterGranularity) -> Self {
        Self {
            path: path.into(),
            granularity,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Log an intake stamped with the current date or time.
    pub fn append(&self, amount_ml: u32) -> Result<WaterRecord> {
        let stamp = self.granularity.stamp_now();
        self.append_at(&stamp, amount_ml)
    }

    pub fn append_at(&self, timestamp: &str, amount_ml: u32) -> Result<WaterRecord> {
        validate_water_amount(amount_ml)?;
        if timestamp.trim().is_empty() || timestamp.contains([',', '"', '\n', '\r']) {
            bail!("Invalid water log timestamp '{timestamp}'");
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Could not open water log: {}", self.path.display()))?;

        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        wtr.write_record([timestamp, amount_ml.to_string().as_str()])?;
        wtr.flush()
            .with_context(|| format!("Failed to write water log: {}", self.path.display()))?;

        debug!(timestamp, amount_ml, "appended water record");
        Ok(WaterRecord {
            timestamp: timestamp.to_string(),
            amount_ml,
        })
    }

    /// Every well-formed record in file order. A missing log is empty.
    pub fn records(&self) -> Result<Vec<WaterRecord>> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Could not open water log: {}", self.path.display())
                });
            }
        };

        let mut records = Vec::new();
        for (idx, line) in lossy_lines(BufReader::new(file)).enumerate() {
            let line = line
                .with_context(|| format!("Failed to read water log: {}", self.path.display()))?;
            if line.trim().is_empty() {
                continue;
            }

            match parse_water_line(&line) {
                Some(record) => records.push(record),
                None => warn!(line = idx + 1, "skipping malformed water record"),
            }
        }

        Ok(records)
    }

    /// Sum of all amounts logged on `date` (`YYYY-MM-DD`).
    pub fn total_for_date(&self, date: &str) -> Result<u64> {
        let target = date_prefix(date.trim());
        let total = self
            .records()?
            .iter()
            .filter(|r| r.date_key() == target)
            .map(|r| u64::from(r.amount_ml))
            .sum();
        Ok(total)
    }

    pub fn total_for_today(&self) -> Result<u64> {
        self.total_for_date(&current_date())
    }
}

/// `timestamp,amount_ml`; anything else on the line is malformed.
fn parse_water_line(line: &str) -> Option<WaterRecord> {
    let (timestamp, amount) = line.split_once(',')?;
    let timestamp = timestamp.trim();
    if timestamp.is_empty() || timestamp.contains('"') {
        return None;
    }
    let amount_ml = amount.trim().parse::<u32>().ok()?;
    Some(WaterRecord {
        timestamp: timestamp.to_string(),
        amount_ml,
    })
}
