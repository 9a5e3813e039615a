//! Interactive request/response used by task editing
//!
//! Editing asks one question per field through [`Prompter`], so the flow can
//! be driven by a terminal or by a scripted reader in tests.

use anyhow::{Result, bail};
use std::fmt;
use std::io::{self, BufRead, Write};

/// Task field being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Frequency,
    Group,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Title => "Title",
            Field::Frequency => "Frequency",
            Field::Group => "Group",
        })
    }
}

pub trait Prompter {
    /// Ask for a new value of `field`, showing its `current` value
    ///
    /// Returns the raw answer without the line terminator.
    fn ask(&mut self, field: Field, current: &str) -> Result<String>;

    /// Tell the user why an answer was not accepted
    fn notify(&mut self, message: &str);
}

/// Line-based prompter over any reader/writer pair
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl LinePrompter<io::StdinLock<'static>, io::Stderr> {
    /// Prompt on stderr and read answers from stdin
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn ask(&mut self, field: Field, current: &str) -> Result<String> {
        write!(self.output, "{} [{}]: ", field, current)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            bail!("Input closed while editing {}", field.to_string().to_lowercase());
        }

        let answer = line
            .strip_suffix('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .unwrap_or(&line);
        Ok(answer.to_string())
    }

    fn notify(&mut self, message: &str) {
        // Write failures surface on the next ask()
        let _ = writeln!(self.output, "{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_line_prompter_keeps_spaces_and_strips_newline() {
        let mut prompter = LinePrompter::new(Cursor::new("new title\r\n \n\n"), Vec::new());
        assert_eq!(prompter.ask(Field::Title, "old").unwrap(), "new title");
        assert_eq!(prompter.ask(Field::Frequency, "1d").unwrap(), " ");
        assert_eq!(prompter.ask(Field::Group, "").unwrap(), "");

        let output = String::from_utf8(prompter.into_output()).unwrap();
        assert!(output.contains("Title [old]: "));
        assert!(output.contains("Frequency [1d]: "));
    }

    #[test]
    fn test_line_prompter_fails_on_eof() {
        let mut prompter = LinePrompter::new(Cursor::new(""), Vec::new());
        assert!(prompter.ask(Field::Title, "old").is_err());
    }
}
