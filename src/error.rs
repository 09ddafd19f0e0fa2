//! Error types for flakehunt

use std::io;
use thiserror::Error;

/// Result type alias for flakehunt operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for flakehunt
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file error or invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The test command could not be started.
    #[error("Command execution failed: {0}")]
    CommandExecution(String),

    /// A summary line did not carry a usable count.
    #[error("Parse error: {0}")]
    Parse(String),

    /// I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A classifier pattern failed to compile.
    #[error("Invalid pattern: {0}")]
    Regex(#[from] regex::Error),

    /// Other error with custom message.
    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::CommandExecution("Failed to spawn dotnet: not found".to_string());
        assert_eq!(
            err.to_string(),
            "Command execution failed: Failed to spawn dotnet: not found"
        );
    }

    #[test]
    fn test_other_error_display() {
        let err = Error::Other("custom error".to_string());
        assert_eq!(err.to_string(), "custom error");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
