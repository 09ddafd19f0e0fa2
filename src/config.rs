//! Configuration file (.flakehunt.conf) parsing and handling
//!
//! The .flakehunt.conf file uses INI format with a [DEFAULT] section. Every
//! key is optional; a missing file means the built-in `dotnet test` setup.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = ".flakehunt.conf";

/// Iteration cap for `soak` when nothing else is configured
pub const DEFAULT_MAX_RUNS: u32 = 1000;

/// Configuration loaded from .flakehunt.conf
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FlakeConfig {
    /// Test runner program followed by its fixed arguments
    pub test_command: Vec<String>,

    /// Arguments added on every run after the first to skip restore and build
    pub skip_build_args: Vec<String>,

    /// Upper bound on the number of runs in soak mode
    pub max_runs: u32,
}

impl Default for FlakeConfig {
    fn default() -> Self {
        FlakeConfig {
            test_command: vec![
                "dotnet".to_string(),
                "test".to_string(),
                "-v".to_string(),
                "n".to_string(),
                "-l:console;verbosity=detailed".to_string(),
            ],
            skip_build_args: vec!["--no-restore".to_string(), "--no-build".to_string()],
            max_runs: DEFAULT_MAX_RUNS,
        }
    }
}

impl FlakeConfig {
    /// Load configuration from `dir`, falling back to defaults when the file is absent
    pub fn load_from_directory(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            return Ok(FlakeConfig::default());
        }
        Self::load_from_file(&config_path)
    }

    /// Load configuration from a .flakehunt.conf file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", CONFIG_FILE_NAME, e)))?;

        Self::parse(&contents)
    }

    /// Parse configuration from a string
    pub fn parse(contents: &str) -> Result<Self> {
        let ini: HashMap<String, HashMap<String, String>> = serde_ini::from_str(contents)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e)))?;

        let default = ini.get("DEFAULT").ok_or_else(|| {
            Error::Config(format!("No [DEFAULT] section in {}", CONFIG_FILE_NAME))
        })?;

        let mut config = FlakeConfig::default();

        if let Some(cmd) = default.get("test_command") {
            config.test_command = split_words("test_command", cmd)?;
            if config.test_command.is_empty() {
                return Err(Error::Config("test_command cannot be empty".to_string()));
            }
        }

        if let Some(args) = default.get("skip_build_args") {
            config.skip_build_args = split_words("skip_build_args", args)?;
        }

        if let Some(max_runs) = default.get("max_runs") {
            config.max_runs = max_runs.trim().parse::<u32>().map_err(|e| {
                Error::Config(format!("Invalid max_runs '{}': {}", max_runs, e))
            })?;
            if config.max_runs == 0 {
                return Err(Error::Config("max_runs must be greater than 0".to_string()));
            }
        }

        Ok(config)
    }
}

fn split_words(key: &str, value: &str) -> Result<Vec<String>> {
    shell_words::split(value)
        .map_err(|e| Error::Config(format!("Failed to split {} '{}': {}", key, value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_target_dotnet() {
        let config = FlakeConfig::default();
        assert_eq!(config.test_command[0], "dotnet");
        assert_eq!(config.test_command[1], "test");
        assert!(config
            .test_command
            .contains(&"-l:console;verbosity=detailed".to_string()));
        assert_eq!(config.skip_build_args, vec!["--no-restore", "--no-build"]);
        assert_eq!(config.max_runs, DEFAULT_MAX_RUNS);
    }

    #[test]
    fn test_parse_full_config() {
        let config_str = r#"
[DEFAULT]
test_command=sh "fake runner.sh" --verbose
skip_build_args=--skip
max_runs=25
"#;

        let config = FlakeConfig::parse(config_str).unwrap();
        assert_eq!(config.test_command, vec!["sh", "fake runner.sh", "--verbose"]);
        assert_eq!(config.skip_build_args, vec!["--skip"]);
        assert_eq!(config.max_runs, 25);
    }

    #[test]
    fn test_parse_partial_config_keeps_defaults() {
        let config_str = r#"
[DEFAULT]
max_runs=3
"#;

        let config = FlakeConfig::parse(config_str).unwrap();
        assert_eq!(config.test_command, FlakeConfig::default().test_command);
        assert_eq!(config.max_runs, 3);
    }

    #[test]
    fn test_empty_skip_build_args() {
        let config_str = r#"
[DEFAULT]
skip_build_args=
"#;

        let config = FlakeConfig::parse(config_str).unwrap();
        assert!(config.skip_build_args.is_empty());
    }

    #[test]
    fn test_empty_test_command() {
        let config_str = r#"
[DEFAULT]
test_command=
"#;

        let result = FlakeConfig::parse(config_str);
        assert!(result.unwrap_err().to_string().contains("test_command"));
    }

    #[test]
    fn test_unbalanced_quotes() {
        let config_str = r#"
[DEFAULT]
test_command=dotnet "test
"#;

        let result = FlakeConfig::parse(config_str);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_invalid_max_runs() {
        for value in ["lots", "0", "-4"] {
            let config_str = format!("[DEFAULT]\nmax_runs={}\n", value);
            let result = FlakeConfig::parse(&config_str);
            assert!(result.is_err(), "max_runs={} should be rejected", value);
        }
    }

    #[test]
    fn test_missing_default_section() {
        let config_str = r#"
[OTHER]
test_command=foo
"#;

        let result = FlakeConfig::parse(config_str);
        assert!(result.unwrap_err().to_string().contains("DEFAULT"));
    }

    #[test]
    fn test_load_from_directory_without_file() {
        let temp = TempDir::new().unwrap();
        let config = FlakeConfig::load_from_directory(temp.path()).unwrap();
        assert_eq!(config, FlakeConfig::default());
    }

    #[test]
    fn test_load_from_directory_with_file() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "[DEFAULT]\ntest_command=./run-tests\n",
        )
        .unwrap();

        let config = FlakeConfig::load_from_directory(temp.path()).unwrap();
        assert_eq!(config.test_command, vec!["./run-tests"]);
    }
}
