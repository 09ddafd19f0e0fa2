//! Repeated runs and cross-run aggregation
//!
//! [`scan`] drives a [`TestRunner`] once per run, feeds its output through a
//! [`RunParser`], prints the per-run banners and folds each [`RunResult`] into
//! an [`AggregateState`]. [`report_summary`] prints the final tallies.

use crate::classifier::{LineClassifier, RunParser};
use crate::error::Result;
use crate::highlight::Palette;
use crate::testcommand::TestRunner;
use crate::ui::UI;
use std::collections::HashMap;
use tracing::debug;

/// Prompt shown between runs when pausing after failures
pub const PAUSE_PROMPT: &str = "Press any key to continue to next run...";

/// Outcome of a single run of the test command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunResult {
    pub run_number: u32,
    /// Passed count from the runner's summary line
    pub passed_count: u64,
    /// Failed count from the runner's summary line
    pub failed_count: u64,
    /// Per-test pass lines seen in the output
    pub tests_passed: u64,
    /// Per-test failure lines seen in the output
    pub tests_failed: u64,
    pub failed_test_ids: Vec<String>,
}

impl RunResult {
    pub fn new(run_number: u32) -> Self {
        RunResult {
            run_number,
            ..Default::default()
        }
    }

    /// Whether either the summary or the per-test lines report a failure
    pub fn has_failures(&self) -> bool {
        self.failed_count > 0 || self.tests_failed > 0
    }
}

/// Totals across every completed run
#[derive(Debug, Clone, Default)]
pub struct AggregateState {
    pub total_runs: u32,
    pub total_passed: u64,
    pub total_failed: u64,
    counts: HashMap<String, usize>,
    first_seen: Vec<String>,
}

impl AggregateState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one run into the totals
    pub fn record(&mut self, run: &RunResult) {
        self.total_runs += 1;
        self.total_passed += run.tests_passed;
        self.total_failed += run.tests_failed;

        for test_id in &run.failed_test_ids {
            match self.counts.get_mut(test_id) {
                Some(count) => *count += 1,
                None => {
                    self.counts.insert(test_id.clone(), 1);
                    self.first_seen.push(test_id.clone());
                }
            }
        }

        debug!(
            run = run.run_number,
            total_runs = self.total_runs,
            distinct_failures = self.first_seen.len(),
            "folded run into totals"
        );
    }

    pub fn has_failures(&self) -> bool {
        self.total_failed > 0 || !self.first_seen.is_empty()
    }

    /// How many times `test_id` has failed so far
    pub fn failure_count(&self, test_id: &str) -> usize {
        self.counts.get(test_id).copied().unwrap_or(0)
    }

    /// Failing test ids by descending count, ties in first-seen order
    pub fn failure_table(&self) -> Vec<(&str, usize)> {
        let mut table: Vec<(&str, usize)> = self
            .first_seen
            .iter()
            .map(|id| (id.as_str(), self.failure_count(id)))
            .collect();
        // Stable sort keeps first-seen order among equal counts
        table.sort_by(|a, b| b.1.cmp(&a.1));
        table
    }
}

/// How a scan should proceed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Number of runs to perform
    pub runs: u32,
    /// Echo per-test pass lines
    pub show_passed: bool,
    /// Wait for a keypress after any run with failures
    pub pause_on_failure: bool,
}

/// Perform one run and print its banners
pub fn run_once(
    runner: &dyn TestRunner,
    classifier: &LineClassifier,
    ui: &mut dyn UI,
    palette: &Palette,
    run_number: u32,
    show_passed: bool,
) -> Result<RunResult> {
    ui.output(&palette.blue(&format!("Starting Run #{}", run_number)))?;

    let mut parser = RunParser::new(classifier, palette, run_number, show_passed);
    let outcome = runner.run(run_number, &mut |line: &str| {
        parser.feed(ui, line)?;
        let so_far = parser.current();
        ui.progress(&format!(
            "Run #{}: {} passed, {} failed",
            run_number, so_far.tests_passed, so_far.tests_failed
        ))
    });
    ui.clear_progress()?;
    outcome?;

    let result = parser.finish();
    ui.output(&format!(
        "Run {} Complete ({} {})",
        run_number,
        palette.green(&format!("Passed: {}", result.passed_count)),
        palette.red(&format!("Failed: {}", result.failed_count)),
    ))?;

    Ok(result)
}

/// Run the test command `options.runs` times and aggregate the results
pub fn scan(
    runner: &dyn TestRunner,
    ui: &mut dyn UI,
    palette: &Palette,
    options: &ScanOptions,
) -> Result<AggregateState> {
    let classifier = LineClassifier::new()?;
    let mut state = AggregateState::new();

    for run_number in 1..=options.runs {
        let result = run_once(
            runner,
            &classifier,
            ui,
            palette,
            run_number,
            options.show_passed,
        )?;
        state.record(&result);

        if options.pause_on_failure && result.has_failures() && run_number < options.runs {
            ui.wait_for_key(PAUSE_PROMPT)?;
        }
    }

    Ok(state)
}

/// Print the totals block, and the failure table when `with_table` is set
pub fn report_summary(
    ui: &mut dyn UI,
    palette: &Palette,
    state: &AggregateState,
    with_table: bool,
) -> Result<()> {
    ui.output("")?;
    ui.output(&palette.blue("====Test Summary:===="))?;
    ui.output(&format!("Total Runs: {}", state.total_runs))?;
    ui.output(&palette.green(&format!("Total Passed: {}", state.total_passed)))?;
    ui.output(&palette.red(&format!("Total Failed: {}", state.total_failed)))?;

    if !with_table {
        return Ok(());
    }

    let table = state.failure_table();
    ui.output("")?;
    if table.is_empty() {
        ui.output(&palette.green("No test failures detected in any namespace!"))?;
    } else {
        ui.output(&palette.red("Failed Tests Summary:"))?;
        for (test_id, count) in table {
            ui.output(&format!("  {}: {} failures", test_id, count))?;
        }
    }

    Ok(())
}
