//! Test command execution
//!
//! This module provides the TestCommand struct which builds the argument list
//! for one run of the test runner, spawns it, and streams its merged output.

use crate::config::FlakeConfig;
use crate::error::{Error, Result};
use crate::merged_output;
use std::io::PipeReader;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use tracing::debug;

/// Something that can perform one run of the test suite
pub trait TestRunner {
    /// Run the suite, calling `on_line` for each line of merged output as it arrives
    ///
    /// Returns once the output is exhausted and the run has finished. The
    /// runner's exit status is not part of the result.
    fn run(&self, run_number: u32, on_line: &mut dyn FnMut(&str) -> Result<()>) -> Result<()>;
}

/// Test command executor
#[derive(Debug, Clone)]
pub struct TestCommand {
    program: String,
    runner_args: Vec<String>,
    skip_build_args: Vec<String>,
    passthrough: Vec<String>,
    base_dir: PathBuf,
}

impl TestCommand {
    /// Create a TestCommand from a configuration
    pub fn new(config: &FlakeConfig, base_dir: PathBuf, passthrough: Vec<String>) -> Result<Self> {
        let (program, runner_args) = config
            .test_command
            .split_first()
            .ok_or_else(|| Error::Config("test_command cannot be empty".to_string()))?;

        Ok(TestCommand {
            program: program.clone(),
            runner_args: runner_args.to_vec(),
            skip_build_args: config.skip_build_args.clone(),
            passthrough,
            base_dir,
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments for one run
    ///
    /// The first run restores and builds; later runs reuse that build.
    pub fn build_args(&self, is_first_run: bool) -> Vec<String> {
        let mut args = self.runner_args.clone();
        if !is_first_run {
            args.extend(self.skip_build_args.iter().cloned());
        }
        args.extend(self.passthrough.iter().cloned());
        args
    }

    /// Start the runner with stdout and stderr sharing one pipe
    ///
    /// Returns the child together with the read end of that pipe.
    pub fn spawn(&self, is_first_run: bool) -> Result<(Child, PipeReader)> {
        let args = self.build_args(is_first_run);
        debug!(program = %self.program, ?args, dir = %self.base_dir.display(), "spawning test command");

        let pipe = merged_output::shared_pipe()?;
        let child = Command::new(&self.program)
            .args(&args)
            .current_dir(&self.base_dir)
            .stdin(Stdio::null())
            .stdout(pipe.stdout)
            .stderr(pipe.stderr)
            .spawn()
            .map_err(|e| {
                Error::CommandExecution(format!("Failed to spawn {}: {}", self.program, e))
            })?;

        Ok((child, pipe.reader))
    }
}

impl TestRunner for TestCommand {
    fn run(&self, run_number: u32, on_line: &mut dyn FnMut(&str) -> Result<()>) -> Result<()> {
        let (mut child, output) = self.spawn(run_number == 1)?;

        let mut outcome = Ok(());
        for line in merged_output::lines(output) {
            outcome = line.map_err(Error::from).and_then(|line| on_line(line.as_str()));
            if outcome.is_err() {
                let _ = child.kill();
                break;
            }
        }

        let status = child.wait()?;
        debug!(run = run_number, %status, "test command finished");

        outcome
    }
}
