//! flakehunt - find flaky tests by running a suite over and over
//!
//! flakehunt invokes an external test runner (by default `dotnet test` with
//! detailed console logging) repeatedly, reads its console output line by
//! line, echoes the parts worth seeing, and tallies which tests fail and how
//! often across runs.
//!
//! # Architecture
//!
//! - [`testcommand`]: building the runner's argument list and spawning it
//! - [`merged_output`]: merging the runner's stdout and stderr into one stream of lines
//! - [`classifier`]: classifying each output line and counting per-run results
//! - [`aggregate`]: repeating runs and folding results into cross-run totals
//! - [`commands`]: the `soak` and `find` commands
//! - [`config`]: .flakehunt.conf configuration file parsing
//! - [`highlight`]: console colors
//! - [`logging`]: diagnostic logging setup
//! - [`ui`]: user interface abstraction for output
//! - [`error`]: Error types and Result alias
//!
//! # Example
//!
//! ```
//! use flakehunt::classifier::{LineClass, LineClassifier};
//!
//! # fn main() -> flakehunt::error::Result<()> {
//! let classifier = LineClassifier::new()?;
//! let class = classifier.classify("  Failed Orders.Checkout.AppliesDiscount [35 ms]", false)?;
//! assert_eq!(
//!     class,
//!     LineClass::TestFailed { test_id: "Orders.Checkout.AppliesDiscount" }
//! );
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod classifier;
pub mod commands;
pub mod config;
pub mod error;
pub mod highlight;
pub mod logging;
pub mod merged_output;
pub mod testcommand;
pub mod ui;

pub use error::{Error, Result};
