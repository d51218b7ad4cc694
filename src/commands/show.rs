//! The `show` command: print the merged descriptor for an environment.
//!
//! Serializes the exact JSON the engine would receive. The development
//! variant uses the configured address without probing the network, so
//! `show` never touches sockets or the filesystem beyond reading config.

use crate::cli::ShowArgs;
use crate::config::Mode;
use crate::context::require_project;
use crate::descriptor::merge;
use crate::error::{KilnError, Result};
use crate::profile::{base_descriptor, dev_overlay, prod_overlay};

pub fn cmd_show(args: ShowArgs) -> Result<()> {
    let (ctx, config) = require_project()?;

    let mode = Mode::from_str(&args.mode).ok_or_else(|| {
        KilnError::Config(format!(
            "unknown mode '{}'. Expected 'development' or 'production'.",
            args.mode
        ))
    })?;

    let base = base_descriptor(&config, &ctx, mode);
    let merged = match mode {
        Mode::Production => merge(
            base,
            prod_overlay(&config, &ctx, super::build::env_report_requested()),
        )?,
        Mode::Development => merge(
            base,
            dev_overlay(&config, &ctx, &config.dev.host, config.dev.port),
        )?,
    };

    println!("{}", merged.to_json()?);

    Ok(())
}
