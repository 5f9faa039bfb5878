//! CLI command handling module
//!
//! Handles all CLI subcommands and argument parsing.

mod commands;
mod logging;
mod version;

pub use commands::{ComputeArgs, ConfigSubcommand, handle_compute_command, handle_config_command};
pub use logging::*;
pub use version::display_version;
