//! CLI commands

pub mod scan;
pub mod types;

pub use types::{AlgoArg, Cli, Commands, ScanArgs};
