//! The `check` command: run the version gate without building.

use crate::context::require_project;
use crate::error::Result;
use crate::preflight;
use colored::Colorize;

pub fn cmd_check() -> Result<()> {
    let (_ctx, config) = require_project()?;

    let observed = preflight::run(&config.preflight)?;

    if observed.is_empty() {
        println!("No tools are tracked by this project.");
        return Ok(());
    }

    for tool in &observed {
        println!(
            "  {} {} {} satisfies {}",
            "ok".green(),
            tool.name,
            preflight::clean_version(&tool.current),
            tool.requirement
        );
    }
    println!();
    println!("{}", "All tool versions satisfy their requirements.".green());

    Ok(())
}
