use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::Result;

/// Input reached end of stream while a prompt was waiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct InputClosed;

impl fmt::Display for InputClosed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("input closed")
    }
}

impl std::error::Error for InputClosed {}

/// Line-oriented prompting over any reader/writer pair.
///
/// Every read consumes a whole line, so a bad entry never leaks into the
/// next prompt.
pub(crate) struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub(crate) fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub(crate) fn into_output(self) -> W {
        self.output
    }

    pub(crate) fn say(&mut self, text: impl fmt::Display) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Read one trimmed line. A line that is not valid UTF-8 is discarded
    /// and the prompt repeated.
    pub(crate) fn prompt_line(&mut self, prompt: &str) -> Result<String> {
        loop {
            write!(self.output, "{prompt}")?;
            self.output.flush()?;

            let mut bytes = Vec::new();
            if self.input.read_until(b'\n', &mut bytes)? == 0 {
                return Err(InputClosed.into());
            }
            match String::from_utf8(bytes) {
                Ok(line) => return Ok(line.trim().to_string()),
                Err(_) => self.say("Invalid input. Please try again.")?,
            }
        }
    }

    /// Re-prompt until the line parses as `T`.
    pub(crate) fn prompt_number<T: FromStr>(&mut self, prompt: &str) -> Result<T> {
        loop {
            let line = self.prompt_line(prompt)?;
            if let Ok(value) = line.parse::<T>() {
                return Ok(value);
            }
            self.say("Invalid input. Please enter a number.")?;
        }
    }

    /// Re-prompt until the line parses and passes `accept`, showing `error` on rejection.
    pub(crate) fn prompt_valid<T, F>(&mut self, prompt: &str, error: &str, accept: F) -> Result<T>
    where
        T: FromStr,
        F: Fn(&T) -> bool,
    {
        loop {
            let value = self.prompt_number::<T>(prompt)?;
            if accept(&value) {
                return Ok(value);
            }
            self.say(error)?;
        }
    }

    /// Print a numbered menu and read the selection.
    pub(crate) fn prompt_menu(&mut self, title: &str, options: &[&str]) -> Result<i64> {
        self.say(format!("\n------ {title} ------"))?;
        for (i, option) in options.iter().enumerate() {
            self.say(format!("{}) {option}", i + 1))?;
        }
        self.prompt_number("Choose an option: ")
    }
}
