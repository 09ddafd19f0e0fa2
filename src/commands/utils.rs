//! Utility functions for command implementation

use crate::config::FlakeConfig;
use crate::error::Result;
use crate::testcommand::TestCommand;
use std::path::Path;

/// Load the configuration for the given directory (or current directory if None)
/// and build the test command that runs there
pub fn open_test_command(
    base_path: Option<&str>,
    passthrough: &[String],
) -> Result<(FlakeConfig, TestCommand)> {
    let base = base_path.map(Path::new).unwrap_or_else(|| Path::new("."));

    let config = FlakeConfig::load_from_directory(base)?;
    let test_cmd = TestCommand::new(&config, base.to_path_buf(), passthrough.to_vec())?;
    Ok((config, test_cmd))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONFIG_FILE_NAME;
    use tempfile::TempDir;

    #[test]
    fn test_open_test_command_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().to_string_lossy().to_string();

        let (config, cmd) = open_test_command(Some(&path), &["--filter".to_string()]).unwrap();
        assert_eq!(config, FlakeConfig::default());
        assert_eq!(cmd.program(), "dotnet");
        assert_eq!(cmd.build_args(true).last().unwrap(), "--filter");
    }

    #[test]
    fn test_open_test_command_bad_config() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(CONFIG_FILE_NAME), "[DEFAULT]\nmax_runs=none\n").unwrap();
        let path = temp.path().to_string_lossy().to_string();

        assert!(open_test_command(Some(&path), &[]).is_err());
    }
}
