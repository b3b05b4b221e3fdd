//! CLI Surface
//!
//! Subcommand implementations and terminal output helpers.

pub mod commands;
pub mod output;
