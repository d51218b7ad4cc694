//! The `build` command: the production pipeline.
//!
//! Steps run in strict sequence and short-circuit on the first failure:
//! version gate, output cleanup, overlay merge, engine invocation, report.

use crate::cli::BuildArgs;
use crate::config::{Config, Mode};
use crate::context::{ProjectContext, require_project};
use crate::descriptor::merge;
use crate::engine::{self, BuildStats};
use crate::error::{KilnError, Result};
use crate::preflight;
use crate::profile::{base_descriptor, prod_overlay};
use colored::Colorize;
use indicatif::ProgressBar;
use std::time::Duration;

/// Environment variable that enables the bundle-analysis report.
pub const REPORT_ENV_VAR: &str = "KILN_REPORT";

pub fn cmd_build(args: BuildArgs) -> Result<()> {
    let (ctx, config) = require_project()?;

    preflight::run(&config.preflight)?;

    let report_requested = args.report || env_report_requested();

    let spinner = ProgressBar::new_spinner();
    spinner.set_message("building for production...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let started = chrono::Utc::now();
    let result = run_pipeline(&ctx, &config, report_requested);
    spinner.finish_and_clear();
    let stats = result?;

    print!("{}", stats.render());
    println!();

    if stats.has_errors() {
        println!("{}", "  Build failed with errors.".red());
        println!();
        return Err(KilnError::Build(format!(
            "engine reported {} compile error(s)",
            stats.errors.len()
        )));
    }

    let elapsed_ms = stats.duration_ms.unwrap_or_else(|| {
        chrono::Utc::now()
            .signed_duration_since(started)
            .num_milliseconds()
            .max(0) as u64
    });
    println!(
        "{}",
        format!("  Build complete in {:.1}s.", elapsed_ms as f64 / 1000.0).cyan()
    );
    println!();
    println!(
        "{}",
        "  Tip: built files are meant to be served over an HTTP server.\n  \
         Opening index.html over file:// won't work."
            .yellow()
    );
    println!();

    Ok(())
}

/// The cleanup / merge / engine sequence, separated so the spinner wraps it.
fn run_pipeline(
    ctx: &ProjectContext,
    config: &Config,
    report_requested: bool,
) -> Result<BuildStats> {
    // Remove the previous hashed assets; the HTML entry document is
    // regenerated in place.
    let assets_dir = ctx
        .absolute(&config.build.assets_root)
        .join(&config.build.assets_sub_directory);
    crate::fs::remove_tree(&assets_dir)?;

    let base = base_descriptor(config, ctx, Mode::Production);
    let merged = merge(base, prod_overlay(config, ctx, report_requested))?;

    let handoff = ctx.merged_config_path(Mode::Production);
    crate::fs::write_handoff(&handoff, &merged.to_json()?)?;

    engine::run_build(
        &config.engine.build_command,
        &handoff,
        Mode::Production,
        &ctx.project_root,
    )
}

/// Whether the report env var requests a bundle-analysis report.
pub(crate) fn env_report_requested() -> bool {
    match std::env::var(REPORT_ENV_VAR) {
        Ok(value) => !value.is_empty() && value != "0" && value != "false",
        Err(_) => false,
    }
}
