use anyhow::Result;
use std::io::{BufRead, Write};

use healthdesk_core::dates::{current_date, iso_date};
use healthdesk_core::water::{DAILY_GOAL_ML, WaterLog, WaterStatus};

use super::helpers::{INVALID_CHOICE, prompt_entry_date, report_action_error};
use crate::console::Console;
use crate::menu::{WATER_MENU, WaterAction};

pub(crate) fn cmd_water_menu<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    log: &WaterLog,
) -> Result<()> {
    loop {
        let selection = console.prompt_menu("WATER INTAKE TRACKER", WATER_MENU)?;
        match WaterAction::from_selection(selection) {
            None => console.say(INVALID_CHOICE)?,
            Some(WaterAction::Back) => return Ok(()),
            Some(action) => {
                let result = run_action(console, log, action);
                report_action_error(console, result)?;
            }
        }
    }
}

fn run_action<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    log: &WaterLog,
    action: WaterAction,
) -> Result<()> {
    match action {
        WaterAction::Log => {
            let amount: u32 = console.prompt_valid(
                "Enter amount of water (ml): ",
                "Error: Amount must be greater than 0 ml.",
                |a: &u32| *a > 0,
            )?;
            let record = log.append(amount)?;
            console.say(format!(
                "Logged {} ml at {}.",
                record.amount_ml, record.timestamp
            ))?;
            let total = log.total_for_today()?;
            print_status(console, &current_date(), total)
        }
        WaterAction::TodayTotal => {
            let total = log.total_for_today()?;
            print_status(console, &current_date(), total)
        }
        WaterAction::TotalForDate => {
            let date = prompt_entry_date(console, "Enter date (DD-MM-YYYY): ", false)?;
            let key = iso_date(date);
            let total = log.total_for_date(&key)?;
            print_status(console, &key, total)
        }
        WaterAction::Back => Ok(()),
    }
}

fn print_status<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    date: &str,
    total_ml: u64,
) -> Result<()> {
    console.say(format!("Total water intake on {date}: {total_ml} ml"))?;
    console.say(format!("Daily goal: {DAILY_GOAL_ML} ml"))?;
    match WaterStatus::for_total(total_ml) {
        WaterStatus::GoalReached => console.say("Goal Reached! Great job staying hydrated."),
        WaterStatus::Remaining(ml) => {
            console.say(format!("Keep going! {ml} ml remaining to reach your goal."))
        }
    }
}
