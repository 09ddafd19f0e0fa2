//! Command system for flakehunt
//!
//! Commands are executed through the Command trait.

use crate::error::Result;
use crate::ui::UI;

pub mod find;
pub mod soak;
mod utils;

pub use find::FindCommand;
pub use soak::SoakCommand;

/// Trait that all commands must implement
pub trait Command {
    /// Execute the command, returning the process exit code
    fn execute(&self, ui: &mut dyn UI) -> Result<i32>;
}
