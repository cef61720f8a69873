use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::error::ConsoleError;

pub const INVALID_NUMBER: &str = "Invalid input. Please enter a number: ";

/// Line-oriented prompting over any reader and writer.
#[derive(Debug)]
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self { Self { input, output } }

    pub fn out(&mut self) -> &mut W { &mut self.output }

    pub fn into_inner(self) -> (R, W) { (self.input, self.output) }

    /// Next input line without its line ending, trimmed. Bytes that are not
    /// UTF-8 become U+FFFD instead of failing the read.
    pub fn read_line(&mut self) -> Result<String, ConsoleError> {
        self.output.flush()?;
        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            return Err(ConsoleError::Eof);
        }
        Ok(String::from_utf8_lossy(&raw).trim().to_string())
    }

    /// Print `label` and read the answer.
    pub fn ask(&mut self, label: &str) -> Result<String, ConsoleError> {
        write!(self.output, "{label}")?;
        self.read_line()
    }

    /// Like [`Prompter::ask`], but an empty answer is `None`.
    pub fn ask_optional(&mut self, label: &str) -> Result<Option<String>, ConsoleError> {
        let answer = self.ask(label)?;
        Ok((!answer.is_empty()).then_some(answer))
    }

    /// Read a number, re-prompting until the line parses.
    pub fn read_number<T: FromStr>(&mut self) -> Result<T, ConsoleError> {
        loop {
            if let Ok(value) = self.read_line()?.parse::<T>() {
                return Ok(value);
            }
            write!(self.output, "{INVALID_NUMBER}")?;
        }
    }

    pub fn ask_number<T: FromStr>(&mut self, label: &str) -> Result<T, ConsoleError> {
        write!(self.output, "{label}")?;
        self.read_number()
    }

    /// `y` or `yes`, in any case, confirms.
    pub fn confirm(&mut self, message: &str) -> Result<bool, ConsoleError> {
        let answer = self.ask(&format!("\n{message} (y/n): "))?.to_lowercase();
        Ok(answer == "y" || answer == "yes")
    }

    pub fn wait_for_enter(&mut self) -> Result<(), ConsoleError> {
        write!(self.output, "\nPress Enter to continue...")?;
        self.read_line().map(|_| ())
    }
}
