// Line-based prompter over any reader/writer pair

use super::Prompter;
use crate::error::ScaffoldResult;
use std::io::{self, BufRead, Write};

pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompter<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Read one line; closed input is an error so callers never spin
    fn read_line(&mut self) -> ScaffoldResult<String> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed while prompting").into());
        }
        Ok(line.trim().to_string())
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn input(&mut self, message: &str, default: Option<&str>) -> ScaffoldResult<String> {
        match default {
            Some(d) if !d.is_empty() => write!(self.output, "? {} ({}) ", message, d)?,
            _ => write!(self.output, "? {} ", message)?,
        }
        let line = self.read_line()?;
        if line.is_empty() {
            return Ok(default.unwrap_or_default().to_string());
        }
        Ok(line)
    }

    fn select(&mut self, message: &str, choices: &[&str], default: usize) -> ScaffoldResult<usize> {
        writeln!(self.output, "? {}", message)?;
        for (i, choice) in choices.iter().enumerate() {
            let marker = if i == default { ">" } else { " " };
            writeln!(self.output, "  {} {}) {}", marker, i + 1, choice)?;
        }

        loop {
            write!(self.output, "  Answer [{}]: ", default + 1)?;
            let line = self.read_line()?;
            if line.is_empty() {
                return Ok(default);
            }
            match line.parse::<usize>() {
                Ok(n) if (1..=choices.len()).contains(&n) => return Ok(n - 1),
                _ => self.warn(&format!("Enter a number between 1 and {}", choices.len())),
            }
        }
    }

    fn confirm(&mut self, message: &str, default: bool) -> ScaffoldResult<bool> {
        let hint = if default { "Y/n" } else { "y/N" };
        loop {
            write!(self.output, "? {} ({}) ", message, hint)?;
            let line = self.read_line()?;
            match line.to_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.warn("Please answer yes or no"),
            }
        }
    }

    fn warn(&mut self, message: &str) {
        // Best effort: a broken output stream surfaces on the next read
        let _ = writeln!(self.output, ">> {}", message);
    }
}
