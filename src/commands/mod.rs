//! Command implementations for kiln.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod build;
mod check;
mod clean;
mod serve;
mod show;

use crate::cli::Command;
use crate::error::Result;

/// Dispatch a command to its implementation.
///
/// This is the main entry point for command execution. Each command
/// is routed to its handler function.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Build(args) => build::cmd_build(args),
        Command::Serve => serve::cmd_serve(),
        Command::Clean(args) => clean::cmd_clean(args),
        Command::Check => check::cmd_check(),
        Command::Show(args) => show::cmd_show(args),
    }
}
