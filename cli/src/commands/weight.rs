use anyhow::Result;
use std::io::{BufRead, Write};
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use healthdesk_core::dates::format_entry_date;
use healthdesk_core::models::WeightEntry;
use healthdesk_core::weight::{Trend, WeightLog, progress_report};

use super::helpers::{INVALID_CHOICE, prompt_entry_date, report_action_error};
use crate::console::Console;
use crate::menu::{WEIGHT_MENU, WeightAction};

const LBS_PER_KG: f64 = 2.20462;

pub(crate) fn cmd_weight_menu<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    log: &WeightLog,
) -> Result<()> {
    loop {
        let selection = console.prompt_menu("WEIGHT TRACKER", WEIGHT_MENU)?;
        match WeightAction::from_selection(selection) {
            None => console.say(INVALID_CHOICE)?,
            Some(WeightAction::Back) => return Ok(()),
            Some(action) => {
                let result = match action {
                    WeightAction::Add => cmd_weight_add(console, log),
                    WeightAction::History => cmd_weight_history(console, log),
                    WeightAction::Progress => cmd_weight_progress(console, log),
                    WeightAction::Back => Ok(()),
                };
                report_action_error(console, result)?;
            }
        }
    }
}

fn cmd_weight_add<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    log: &WeightLog,
) -> Result<()> {
    let date = prompt_entry_date(
        console,
        "Enter date (DD-MM-YYYY, leave blank for today): ",
        true,
    )?;
    let weight_kg: f64 = console.prompt_valid(
        "Enter your weight (kg): ",
        "Error: Weight must be greater than 0.",
        |w: &f64| w.is_finite() && *w > 0.0,
    )?;

    let entry = WeightEntry::new(date, weight_kg)?;
    log.append(&entry)?;

    console.say(format!(
        "Saved {:.2} kg ({:.1} lbs) for {}.",
        entry.weight_kg,
        entry.weight_kg * LBS_PER_KG,
        format_entry_date(entry.date)
    ))
}

fn cmd_weight_history<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    log: &WeightLog,
) -> Result<()> {
    #[derive(Tabled)]
    struct WeightRow {
        #[tabled(rename = "#")]
        idx: usize,
        #[tabled(rename = "Date")]
        date: String,
        #[tabled(rename = "Weight (kg)")]
        kg: String,
        #[tabled(rename = "Weight (lbs)")]
        lbs: String,
    }

    let entries = log.load_sorted()?;
    if entries.is_empty() {
        return console.say("No weight entries found. Add one from the weight tracker menu.");
    }

    let rows: Vec<WeightRow> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| WeightRow {
            idx: i + 1,
            date: format_entry_date(e.date),
            kg: format!("{:.2}", e.weight_kg),
            lbs: format!("{:.1}", e.weight_kg * LBS_PER_KG),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(2..4)).with(Alignment::right()))
        .to_string();
    console.say(table)
}

fn cmd_weight_progress<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    log: &WeightLog,
) -> Result<()> {
    let entries = log.load_sorted()?;
    let Some(progress) = progress_report(&entries) else {
        return console.say("Not enough data. Add at least two weight entries to see progress.");
    };

    console.say(format!(
        "Previous: {} - {:.2} kg",
        format_entry_date(progress.previous.date),
        progress.previous.weight_kg
    ))?;
    console.say(format!(
        "Latest:   {} - {:.2} kg",
        format_entry_date(progress.latest.date),
        progress.latest.weight_kg
    ))?;
    console.say(format!("Change:   {:+.2} kg", progress.difference()))?;
    match progress.trend {
        Trend::Stable => console.say("Progress: your weight is STABLE"),
        trend => console.say(format!("Progress: you {trend}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn run(input: &str, log: &WeightLog) -> String {
        let mut c = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        cmd_weight_menu(&mut c, log).unwrap();
        String::from_utf8(c.into_output()).unwrap()
    }

    fn temp_log() -> (TempDir, WeightLog) {
        let dir = TempDir::new().unwrap();
        let log = WeightLog::new(dir.path().join("weight_log.txt"));
        (dir, log)
    }

    #[test]
    fn test_add_then_report_loss() {
        let (_dir, log) = temp_log();
        let out = run("1\n15-01-2024\n78.5\n1\n01-01-2024\n80\n3\n4\n", &log);
        assert!(out.contains("Saved 78.50 kg"));
        assert!(out.contains("Previous: 01-01-2024 - 80.00 kg"));
        assert!(out.contains("Latest:   15-01-2024 - 78.50 kg"));
        assert!(out.contains("Change:   -1.50 kg"));
        assert!(out.contains("LOST 1.5 kg"));

        let text = std::fs::read_to_string(log.path()).unwrap();
        assert_eq!(text, "15-01-2024,78.50\n01-01-2024,80.00\n");
    }

    #[test]
    fn test_history_is_sorted() {
        let (_dir, log) = temp_log();
        std::fs::write(log.path(), "20-02-2024,70.00\n05-01-2024,72.00\n").unwrap();
        let out = run("2\n4\n", &log);
        let jan = out.find("05-01-2024").unwrap();
        let feb = out.find("20-02-2024").unwrap();
        assert!(jan < feb);
        assert!(out.contains("72.00"));
    }

    #[test]
    fn test_rejects_invalid_date_and_weight() {
        let (_dir, log) = temp_log();
        let out = run("1\n29-02-2023\n28-02-2023\n0\nheavy\n65\n4\n", &log);
        assert!(out.contains("Error: Invalid date"));
        assert!(out.contains("Weight must be greater than 0"));
        assert!(out.contains("Invalid input"));
        assert!(out.contains("Saved 65.00 kg"));
    }

    #[test]
    fn test_progress_needs_two_entries() {
        let (_dir, log) = temp_log();
        let out = run("3\n4\n", &log);
        assert!(out.contains("Not enough data"));
    }

    #[test]
    fn test_stable_progress() {
        let (_dir, log) = temp_log();
        std::fs::write(log.path(), "01-03-2024,70.00\n02-03-2024,70.00\n").unwrap();
        let out = run("3\n4\n", &log);
        assert!(out.contains("STABLE"));
    }

    #[test]
    fn test_empty_history_and_bad_choice() {
        let (_dir, log) = temp_log();
        let out = run("9\n2\n4\n", &log);
        assert!(out.contains(INVALID_CHOICE));
        assert!(out.contains("No weight entries found"));
    }
}
