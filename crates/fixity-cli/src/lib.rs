//! fixity-cli library
//!
//! This module exposes the internal functionality of fixity-cli for testing purposes.

// Make commands module available for internal tests only
#[doc(hidden)]
pub mod commands;

pub mod logging;

pub use commands::types::{AlgoArg, Cli, Commands, ScanArgs};
