//! The `clean` command: remove previous build output.

use crate::cli::CleanArgs;
use crate::context::require_project;
use crate::error::Result;

pub fn cmd_clean(args: CleanArgs) -> Result<()> {
    let (ctx, config) = require_project()?;

    let output_root = ctx.absolute(&config.build.assets_root);
    let target = if args.assets_only {
        output_root.join(&config.build.assets_sub_directory)
    } else {
        output_root
    };

    if !target.exists() {
        println!("Nothing to clean at {}", target.display());
        return Ok(());
    }

    crate::fs::remove_tree(&target)?;
    println!("Removed {}", target.display());

    Ok(())
}
