//! Classification of test runner console output
//!
//! The runner's detailed console logger nests diagnostic text directly under
//! the line that introduces it, with no closing delimiter other than the next
//! recognized line. A single "keep" flag is therefore enough to decide whether
//! an unrecognized line belongs to something worth showing.

use crate::aggregate::RunResult;
use crate::error::{Error, Result};
use crate::highlight::Palette;
use crate::ui::UI;
use regex::Regex;
use tracing::warn;

/// Marker opening a block of captured test output
pub const BLOCK_START_MARKER: &str = "Standard Output Messages:";

/// Markers the runner prints once the whole run has concluded
pub const BLOCK_END_MARKERS: [&str; 2] = ["Test Run Successful.", "Test Run Failed."];

/// Identifier recorded for a failing test whose name could not be extracted
pub const UNKNOWN_TEST_ID: &str = "<unknown>";

/// What a single line of runner output is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass<'a> {
    /// Start of a captured output block
    BlockStart,
    /// The run has concluded
    BlockEnd,
    /// Per-test result line for a passing test
    TestPassed,
    /// Per-test result line for a failing test
    TestFailed { test_id: &'a str },
    /// The runner's own count of passed tests
    SummaryPassed(u64),
    /// The runner's own count of failed tests
    SummaryFailed(u64),
    /// Detail text inside a block worth showing
    Output,
    /// Everything else
    Suppressed,
}

/// Ordered set of patterns applied to each output line
#[derive(Debug, Clone)]
pub struct LineClassifier {
    result_line: Regex,
    failed_id: Regex,
    summary_passed: Regex,
    summary_failed: Regex,
}

impl LineClassifier {
    pub fn new() -> Result<Self> {
        Ok(LineClassifier {
            result_line: Regex::new(r"^\s+(Passed|Failed)\s")?,
            failed_id: Regex::new(r"Failed\s+(.+?)\s*\[")?,
            summary_passed: Regex::new(r"^\s*Passed:\s+(\d+)")?,
            summary_failed: Regex::new(r"^\s*Failed:\s+(\d+)")?,
        })
    }

    /// Classify `line` given the current capture state
    ///
    /// `line` is expected to have its trailing whitespace already removed.
    pub fn classify<'a>(&self, line: &'a str, keep: bool) -> Result<LineClass<'a>> {
        if line.contains(BLOCK_START_MARKER) {
            return Ok(LineClass::BlockStart);
        }

        if BLOCK_END_MARKERS.iter().any(|marker| line.contains(marker)) {
            return Ok(LineClass::BlockEnd);
        }

        if let Some(captures) = self.result_line.captures(line) {
            return Ok(match &captures[1] {
                "Failed" => LineClass::TestFailed {
                    test_id: self.failed_test_id(line),
                },
                _ => LineClass::TestPassed,
            });
        }

        if let Some(count) = summary_count(&self.summary_passed, line)? {
            return Ok(LineClass::SummaryPassed(count));
        }

        if let Some(count) = summary_count(&self.summary_failed, line)? {
            return Ok(LineClass::SummaryFailed(count));
        }

        if keep && !line.trim().is_empty() {
            Ok(LineClass::Output)
        } else {
            Ok(LineClass::Suppressed)
        }
    }

    fn failed_test_id<'a>(&self, line: &'a str) -> &'a str {
        self.failed_id
            .captures(line)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
            .unwrap_or(UNKNOWN_TEST_ID)
    }
}

fn summary_count(pattern: &Regex, line: &str) -> Result<Option<u64>> {
    let Some(captures) = pattern.captures(line) else {
        return Ok(None);
    };
    let digits = &captures[1];
    digits
        .parse::<u64>()
        .map(Some)
        .map_err(|e| Error::Parse(format!("Bad count '{}' in summary line '{}': {}", digits, line, e)))
}

/// Per-run classification state
///
/// Feeds each line through a [`LineClassifier`], echoes what should be seen,
/// and counts results. Consumed by [`RunParser::finish`].
pub struct RunParser<'c> {
    classifier: &'c LineClassifier,
    palette: &'c Palette,
    show_passed: bool,
    keep: bool,
    saw_summary: bool,
    result: RunResult,
}

impl<'c> RunParser<'c> {
    pub fn new(
        classifier: &'c LineClassifier,
        palette: &'c Palette,
        run_number: u32,
        show_passed: bool,
    ) -> Self {
        RunParser {
            classifier,
            palette,
            show_passed,
            keep: false,
            saw_summary: false,
            result: RunResult::new(run_number),
        }
    }

    /// Whether unrecognized lines are currently being echoed
    pub fn keep(&self) -> bool {
        self.keep
    }

    /// Results accumulated so far
    pub fn current(&self) -> &RunResult {
        &self.result
    }

    /// Classify one raw output line and apply its effect
    pub fn feed(&mut self, ui: &mut dyn UI, raw_line: &str) -> Result<()> {
        let line = raw_line.trim_end();

        match self.classifier.classify(line, self.keep)? {
            LineClass::BlockStart => {
                ui.output(line)?;
                self.keep = true;
            }
            LineClass::BlockEnd => {
                self.keep = false;
            }
            LineClass::TestFailed { test_id } => {
                self.result.tests_failed += 1;
                self.result.failed_test_ids.push(test_id.to_string());
                ui.output(&self.palette.highlight_result(line))?;
                self.keep = true;
            }
            LineClass::TestPassed => {
                self.result.tests_passed += 1;
                if self.show_passed {
                    ui.output(&self.palette.highlight_result(line))?;
                }
                self.keep = false;
            }
            LineClass::SummaryPassed(count) => {
                self.result.passed_count = count;
                self.saw_summary = true;
            }
            LineClass::SummaryFailed(count) => {
                self.result.failed_count = count;
                self.saw_summary = true;
            }
            LineClass::Output => {
                ui.output(line)?;
            }
            LineClass::Suppressed => {}
        }

        Ok(())
    }

    pub fn finish(self) -> RunResult {
        if !self.saw_summary {
            warn!(
                run = self.result.run_number,
                "test runner printed no summary counts"
            );
        }
        self.result
    }
}
