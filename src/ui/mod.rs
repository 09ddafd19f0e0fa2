//! User interface abstraction
//!
//! This module provides the UI trait through which every command talks to
//! the operator: echoed runner output, banners, the progress spinner and the
//! between-runs pause.

use crate::error::Result;
use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufRead, Write};
use std::time::Duration;

#[cfg(test)]
pub mod test_ui;

/// Abstract UI trait for command interaction
pub trait UI {
    /// Output a message to the user
    fn output(&mut self, message: &str) -> Result<()>;

    /// Output an error message
    fn error(&mut self, message: &str) -> Result<()>;

    /// Show `prompt` and block until the operator presses a key
    fn wait_for_key(&mut self, prompt: &str) -> Result<()>;

    /// Show or update a transient status line for the run in flight
    fn progress(&mut self, _message: &str) -> Result<()> {
        Ok(())
    }

    /// Remove the transient status line, if any
    fn clear_progress(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Command-line UI implementation
pub struct CliUI {
    stdout: Box<dyn Write>,
    stderr: Box<dyn Write>,
    spinner: Option<ProgressBar>,
}

impl CliUI {
    /// Creates a new command-line UI instance using stdout and stderr.
    pub fn new() -> Self {
        CliUI {
            stdout: Box::new(io::stdout()),
            stderr: Box::new(io::stderr()),
            spinner: None,
        }
    }

    fn write_line(&mut self, to_stderr: bool, message: &str) -> Result<()> {
        let target = if to_stderr {
            &mut self.stderr
        } else {
            &mut self.stdout
        };
        match &self.spinner {
            Some(spinner) => spinner.suspend(|| writeln!(target, "{}", message))?,
            None => writeln!(target, "{}", message)?,
        }
        Ok(())
    }
}

/// Block until `input` yields a full line or reaches EOF
fn wait_for_line<R: BufRead>(input: &mut R) -> Result<()> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(())
}

impl Default for CliUI {
    fn default() -> Self {
        Self::new()
    }
}

impl UI for CliUI {
    fn output(&mut self, message: &str) -> Result<()> {
        self.write_line(false, message)
    }

    fn error(&mut self, message: &str) -> Result<()> {
        self.write_line(true, &format!("Error: {}", message))
    }

    fn wait_for_key(&mut self, prompt: &str) -> Result<()> {
        self.clear_progress()?;
        self.stdout.flush()?;
        let term = Term::stdout();
        if term.is_term() {
            term.write_line(prompt)?;
            term.read_key()?;
        } else {
            // read_key does not block without a terminal
            self.write_line(false, prompt)?;
            self.stdout.flush()?;
            wait_for_line(&mut io::stdin().lock())?;
        }
        Ok(())
    }

    fn progress(&mut self, message: &str) -> Result<()> {
        let spinner = self.spinner.get_or_insert_with(|| {
            let spinner = ProgressBar::new_spinner();
            spinner.set_style(ProgressStyle::default_spinner());
            spinner.enable_steady_tick(Duration::from_millis(120));
            spinner
        });
        spinner.set_message(message.to_string());
        Ok(())
    }

    fn clear_progress(&mut self) -> Result<()> {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestUI {
        output: Vec<String>,
        errors: Vec<String>,
    }

    impl TestUI {
        fn new() -> Self {
            TestUI {
                output: Vec::new(),
                errors: Vec::new(),
            }
        }
    }

    impl UI for TestUI {
        fn output(&mut self, message: &str) -> Result<()> {
            self.output.push(message.to_string());
            Ok(())
        }

        fn error(&mut self, message: &str) -> Result<()> {
            self.errors.push(message.to_string());
            Ok(())
        }

        fn wait_for_key(&mut self, _prompt: &str) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_progress_defaults_are_noops() {
        let mut ui = TestUI::new();
        ui.progress("Run #1: 0 passed, 0 failed").unwrap();
        ui.clear_progress().unwrap();
        assert!(ui.output.is_empty());
        assert!(ui.errors.is_empty());
    }

    #[test]
    fn test_ui_output() {
        let mut ui = TestUI::new();
        ui.output("test message").unwrap();
        ui.error("broken").unwrap();
        assert_eq!(ui.output, vec!["test message"]);
        assert_eq!(ui.errors, vec!["broken"]);
    }

    #[test]
    fn test_wait_for_line_consumes_one_line() {
        let mut input = io::Cursor::new(b"\nnext run\n".to_vec());
        wait_for_line(&mut input).unwrap();
        assert_eq!(input.position(), 1);

        let mut rest = String::new();
        input.read_line(&mut rest).unwrap();
        assert_eq!(rest, "next run\n");
    }

    #[test]
    fn test_wait_for_line_returns_at_eof() {
        let mut input = io::Cursor::new(Vec::new());
        wait_for_line(&mut input).unwrap();
    }

    #[test]
    fn test_cli_ui_writes_through_suspended_spinner() {
        let mut ui = CliUI {
            stdout: Box::new(io::sink()),
            stderr: Box::new(io::sink()),
            spinner: None,
        };
        ui.progress("Run #1").unwrap();
        ui.output("line while spinning").unwrap();
        ui.clear_progress().unwrap();
        assert!(ui.spinner.is_none());
    }
}
