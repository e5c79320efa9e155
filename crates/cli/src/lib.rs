//! `topoctl`: command line access to the topology proto helpers.
//!
//! Provides commands for:
//! - Parsing and sorting tablet aliases
//! - Parsing and listing tablet types
//! - Inspecting a tablet descriptor (database name, MySQL address)

pub mod commands;
pub mod config;

pub use commands::{Command, CommandResult};
pub use config::CliConfig;
