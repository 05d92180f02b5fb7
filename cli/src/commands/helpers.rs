use anyhow::Result;
use chrono::{Local, NaiveDate};
use std::io::{BufRead, Write};
use tracing::debug;

use healthdesk_core::dates::parse_entry_date;

use crate::console::{Console, InputClosed};

pub(crate) const INVALID_CHOICE: &str = "Invalid choice. Please try again.";

/// Report a failed action and carry on. A closed input still ends the session.
pub(crate) fn report_action_error<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    result: Result<()>,
) -> Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(e) if e.is::<InputClosed>() => Err(e),
        Err(e) => {
            debug!("action failed: {e:#}");
            console.say(format!("Error: {e:#}"))
        }
    }
}

/// Ask for a `DD-MM-YYYY` date until a valid one is entered.
/// With `allow_today`, a blank line means today.
pub(crate) fn prompt_entry_date<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    prompt: &str,
    allow_today: bool,
) -> Result<NaiveDate> {
    loop {
        let line = console.prompt_line(prompt)?;
        if allow_today && line.is_empty() {
            return Ok(Local::now().date_naive());
        }
        if let Some(date) = parse_entry_date(&line) {
            return Ok(date);
        }
        console.say("Error: Invalid date. Use DD-MM-YYYY with a year between 1900 and 2100.")?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_prompt_entry_date_reprompts() {
        let mut c = console("2024-01-15\n31-04-2024\n15-01-2024\n");
        let date = prompt_entry_date(&mut c, "Date: ", false).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        let out = String::from_utf8(c.into_output()).unwrap();
        assert_eq!(out.matches("Error: Invalid date").count(), 2);
    }

    #[test]
    fn test_prompt_entry_date_blank_is_today() {
        let mut c = console("\n");
        let date = prompt_entry_date(&mut c, "Date: ", true).unwrap();
        assert_eq!(date, Local::now().date_naive());
    }

    #[test]
    fn test_prompt_entry_date_blank_rejected_without_today() {
        let mut c = console("\n01-02-2024\n");
        let date = prompt_entry_date(&mut c, "Date: ", false).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    }

    #[test]
    fn test_report_action_error() {
        let mut c = console("");
        report_action_error(&mut c, Err(anyhow!("Could not open file"))).unwrap();
        assert!(report_action_error(&mut c, Err(InputClosed.into())).is_err());
        let out = String::from_utf8(c.into_output()).unwrap();
        assert_eq!(out, "Error: Could not open file\n");
    }
}
