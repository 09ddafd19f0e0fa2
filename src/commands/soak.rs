//! Run the suite over and over, stopping after each failing run

use crate::aggregate::{report_summary, scan, ScanOptions};
use crate::commands::utils::open_test_command;
use crate::commands::Command;
use crate::error::Result;
use crate::highlight::Palette;
use crate::ui::UI;

pub struct SoakCommand {
    base_path: Option<String>,
    max_runs: Option<u32>,
    passthrough: Vec<String>,
    palette: Palette,
}

impl SoakCommand {
    pub fn new(base_path: Option<String>, passthrough: Vec<String>) -> Self {
        SoakCommand {
            base_path,
            max_runs: None,
            passthrough,
            palette: Palette::default(),
        }
    }

    /// Override the configured iteration cap
    pub fn with_max_runs(mut self, max_runs: Option<u32>) -> Self {
        self.max_runs = max_runs;
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }
}

impl Command for SoakCommand {
    fn execute(&self, ui: &mut dyn UI) -> Result<i32> {
        let (config, test_cmd) = open_test_command(self.base_path.as_deref(), &self.passthrough)?;

        // Soak never filters pass lines; every result is echoed
        let options = ScanOptions {
            runs: self.max_runs.unwrap_or(config.max_runs),
            show_passed: true,
            pause_on_failure: true,
        };
        let state = scan(&test_cmd, ui, &self.palette, &options)?;
        report_summary(ui, &self.palette, &state, false)?;

        Ok(if state.has_failures() { 1 } else { 0 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::PAUSE_PROMPT;
    use crate::config::CONFIG_FILE_NAME;
    use crate::ui::test_ui::TestUI;
    use tempfile::TempDir;

    #[cfg(unix)]
    #[test]
    fn test_soak_uses_configured_cap_and_pauses() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("runner.sh"),
            "echo '  Passed A [1 ms]'\necho '  Failed B [2 ms]'\necho '     Failed: 1'\n",
        )
        .unwrap();
        std::fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "[DEFAULT]\ntest_command=sh runner.sh\nmax_runs=3\n",
        )
        .unwrap();

        let mut ui = TestUI::new();
        let cmd = SoakCommand::new(Some(temp.path().to_string_lossy().to_string()), vec![])
            .with_palette(Palette::plain());
        let result = cmd.execute(&mut ui);

        assert_eq!(result.unwrap(), 1);
        assert_eq!(ui.prompts, vec![PAUSE_PROMPT, PAUSE_PROMPT]);
        // Pass lines are always echoed in soak mode
        assert!(ui.output.contains(&"  Passed A [1 ms]".to_string()));
        assert!(ui.output.contains(&"Total Runs: 3".to_string()));
        assert!(!ui.output.iter().any(|l| l.contains("Failed Tests Summary")));
    }

    #[cfg(unix)]
    #[test]
    fn test_soak_max_runs_override() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "[DEFAULT]\ntest_command=sh -c true\nmax_runs=50\n",
        )
        .unwrap();

        let mut ui = TestUI::new();
        let cmd = SoakCommand::new(Some(temp.path().to_string_lossy().to_string()), vec![])
            .with_max_runs(Some(2))
            .with_palette(Palette::plain());

        assert_eq!(cmd.execute(&mut ui).unwrap(), 0);
        assert!(ui.output.contains(&"Total Runs: 2".to_string()));
        assert!(ui.prompts.is_empty());
    }
}
