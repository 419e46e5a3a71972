//! Line-based prompting for the interactive menu

use anyhow::Result;
use std::io::{self, BufRead, Write};

/// Reads answers to prompts, one line each
pub struct Prompter<R> {
    input: R,
}

impl<R: BufRead> Prompter<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    /// Print `label` and read one line
    ///
    /// Returns `None` at end of input. Only the line ending is removed, so
    /// free text keeps any spaces the user typed.
    pub fn ask(&mut self, label: &str) -> Result<Option<String>> {
        print!("{}: ", label);
        io::stdout().flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let answer = line
            .strip_suffix('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .unwrap_or(&line);
        Ok(Some(answer.to_string()))
    }

    /// Like [`ask`](Self::ask), with surrounding whitespace removed
    ///
    /// For menu choices, ids and numbers.
    pub fn ask_trimmed(&mut self, label: &str) -> Result<Option<String>> {
        Ok(self.ask(label)?.map(|answer| answer.trim().to_string()))
    }
}
