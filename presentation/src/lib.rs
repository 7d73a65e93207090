//! Presentation layer for ttseval
//!
//! This crate contains CLI definitions, console formatting and the
//! interactive rating REPL.

pub mod cli;
pub mod config;
pub mod output;
pub mod rater;

// Re-export commonly used types
pub use cli::commands::{Cli, VariantArg};
pub use config::{OutputConfig, ReplConfig};
pub use output::console::ConsoleFormatter;
pub use rater::RaterRepl;
