//! CLI argument parsing for kiln.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};

/// Kiln: environment-overlay build orchestrator for front-end bundler
/// pipelines.
///
/// A base build descriptor is merged with exactly one environment overlay
/// (development or production) and handed to the configured engine.
#[derive(Parser, Debug)]
#[command(name = "kiln")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for kiln.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the production build pipeline.
    ///
    /// Gates tool versions, removes previous output assets, merges the
    /// production overlay, and invokes the engine.
    Build(BuildArgs),

    /// Start the development server.
    ///
    /// Probes a free port, merges the development overlay, and hands the
    /// descriptor to the dev server.
    Serve,

    /// Remove previous build output.
    Clean(CleanArgs),

    /// Run the tool version gate without building.
    Check,

    /// Print the merged descriptor for an environment.
    ///
    /// Serializes the exact JSON the engine would receive, without
    /// invoking it.
    Show(ShowArgs),
}

/// Arguments for the `build` command.
#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Generate the bundle-analysis report (KILN_REPORT=1 does the same).
    #[arg(long)]
    pub report: bool,
}

/// Arguments for the `clean` command.
#[derive(Parser, Debug)]
pub struct CleanArgs {
    /// Remove only the hashed assets subdirectory, keeping the HTML entry
    /// document and anything else at the output root.
    #[arg(long)]
    pub assets_only: bool,
}

/// Arguments for the `show` command.
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Environment to merge: "development"/"dev" or "production"/"prod".
    #[arg(long, default_value = "production")]
    pub mode: String,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
