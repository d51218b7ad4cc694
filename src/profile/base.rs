//! The environment-independent base descriptor.

use crate::assets::{INLINE_ASSET_LIMIT, assets_path, hashed_asset_name};
use crate::config::{Config, Mode};
use crate::context::ProjectContext;
use crate::descriptor::{
    BuildDescriptor, ModuleRule, OutputSettings, ResolveSettings, TransformChain, TransformStep,
};

/// Directories lint and transpile rules are restricted to.
const SOURCE_INCLUDES: [&str; 2] = ["src", "test"];

/// Build the base descriptor for the given mode.
///
/// The base carries entries, output templates, resolution settings, and the
/// script/asset rules shared by both environments. Style rules are
/// environment-specific and come from the overlays.
pub fn base_descriptor(config: &Config, ctx: &ProjectContext, mode: Mode) -> BuildDescriptor {
    let mut rules = Vec::new();

    if config.dev.use_lint {
        rules.push(lint_rule(config));
    }

    rules.push(ModuleRule {
        test: r"\.js$".to_string(),
        enforce: None,
        include: SOURCE_INCLUDES.iter().map(|s| s.to_string()).collect(),
        chain: TransformChain::direct(vec![TransformStep::new("babel")]),
    });

    for (pattern, category) in [
        (r"\.(png|jpe?g|gif|svg)(\?.*)?$", "img"),
        (r"\.(mp4|webm|ogg|mp3|wav|flac|aac)(\?.*)?$", "media"),
        (r"\.(woff2?|eot|ttf|otf)(\?.*)?$", "fonts"),
    ] {
        rules.push(ModuleRule {
            test: pattern.to_string(),
            enforce: None,
            include: Vec::new(),
            chain: TransformChain::direct(vec![
                TransformStep::new("url")
                    .with_option("limit", INLINE_ASSET_LIMIT)
                    .with_option(
                        "name",
                        assets_path(config, mode, &hashed_asset_name(category)),
                    ),
            ]),
        });
    }

    BuildDescriptor {
        context: ctx.project_root.display().to_string(),
        entries: config.entries.clone(),
        output: OutputSettings {
            path: ctx.absolute(&config.build.assets_root).display().to_string(),
            filename: "[name].js".to_string(),
            chunk_filename: None,
            public_path: config.assets_public_path(mode).to_string(),
        },
        resolve: ResolveSettings {
            extensions: config.resolve.extensions.clone(),
            aliases: config.resolve.aliases.clone(),
        },
        rules,
        plugins: Vec::new(),
    }
}

/// The lint rule: runs before normal-stage rules over project sources.
fn lint_rule(config: &Config) -> ModuleRule {
    ModuleRule {
        test: r"\.js$".to_string(),
        enforce: Some("pre".to_string()),
        include: SOURCE_INCLUDES.iter().map(|s| s.to_string()).collect(),
        chain: TransformChain::direct(vec![
            TransformStep::new("eslint")
                .with_option("formatter", "friendly")
                .with_option("emit_warning", !config.dev.show_lint_errors_in_overlay),
        ]),
    }
}
