//! Run the suite a fixed number of times and rank failing tests

use crate::aggregate::{report_summary, scan, ScanOptions};
use crate::commands::utils::open_test_command;
use crate::commands::Command;
use crate::error::Result;
use crate::highlight::Palette;
use crate::ui::UI;

pub struct FindCommand {
    base_path: Option<String>,
    runs: u32,
    show_passed: bool,
    passthrough: Vec<String>,
    palette: Palette,
}

impl FindCommand {
    pub fn new(
        base_path: Option<String>,
        runs: u32,
        show_passed: bool,
        passthrough: Vec<String>,
    ) -> Self {
        FindCommand {
            base_path,
            runs,
            show_passed,
            passthrough,
            palette: Palette::default(),
        }
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }
}

impl Command for FindCommand {
    fn execute(&self, ui: &mut dyn UI) -> Result<i32> {
        let (_, test_cmd) = open_test_command(self.base_path.as_deref(), &self.passthrough)?;

        let options = ScanOptions {
            runs: self.runs,
            show_passed: self.show_passed,
            pause_on_failure: false,
        };
        let state = scan(&test_cmd, ui, &self.palette, &options)?;
        report_summary(ui, &self.palette, &state, true)?;

        Ok(if state.has_failures() { 1 } else { 0 })
    }
}
