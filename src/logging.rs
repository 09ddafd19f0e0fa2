//! Diagnostic logging to stderr
//!
//! Log output is controlled by the `FLAKEHUNT_LOG` environment variable,
//! which takes a `tracing_subscriber` targets directive such as `debug` or
//! `flakehunt=trace`. Without it only warnings are shown.

use crate::error::{Error, Result};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{filter::Targets, layer::SubscriberExt, util::SubscriberInitExt, Layer};

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "FLAKEHUNT_LOG";

/// Parse a log filter directive, falling back to warnings only when empty
pub fn parse_targets(directive: &str) -> Result<Targets> {
    if directive.trim().is_empty() {
        return Ok(Targets::new().with_default(LevelFilter::WARN));
    }
    directive
        .parse()
        .map_err(|e| Error::Config(format!("Invalid {} '{}': {}", LOG_ENV, directive, e)))
}

/// Install the global subscriber
pub fn init(ansi: bool) -> Result<()> {
    let directive = std::env::var(LOG_ENV).unwrap_or_default();
    let targets = parse_targets(&directive)?;

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(ansi)
        .with_target(false)
        .without_time()
        .with_filter(targets);

    tracing_subscriber::registry()
        .with(layer)
        .try_init()
        .map_err(|e| Error::Other(format!("Failed to install logger: {}", e)))
}
