//! The production overlay.

use std::collections::BTreeMap;

use crate::assets::assets_path;
use crate::config::{Config, Mode};
use crate::context::ProjectContext;
use crate::descriptor::{EnvironmentOverlay, OutputOverlay, PluginSpec};
use crate::styles::{ChainOptions, style_rules};

/// Minimum number of lazy-loaded children that must share a chunk before it
/// is split into the standalone async vendor chunk.
pub const ASYNC_SHARED_MIN_CHUNKS: u32 = 3;

/// Only artifacts above this size (bytes) get a compressed copy.
const COMPRESSION_THRESHOLD_BYTES: u64 = 10_240;

/// Only artifacts compressing below this ratio get a compressed copy.
const COMPRESSION_MIN_RATIO: f64 = 0.8;

/// Build the production overlay.
///
/// `report_requested` is the per-invocation report override (KILN_REPORT or
/// the --report flag); the config's `bundle_report` enables it permanently.
pub fn prod_overlay(
    config: &Config,
    ctx: &ProjectContext,
    report_requested: bool,
) -> EnvironmentOverlay {
    let build = &config.build;

    let mut extra_plugins = vec![
        PluginSpec::DefineEnv {
            mode: Mode::Production.as_str().to_string(),
        },
        PluginSpec::Minify {
            source_map: build.source_map,
            parallel: true,
        },
        PluginSpec::ExtractStyles {
            filename: assets_path(config, Mode::Production, "css/[name].[contenthash].css"),
            // Extract styles from split chunks too; inlining them there
            // duplicates source maps into the chunk payload.
            all_chunks: true,
        },
        PluginSpec::OptimizeStyles {
            source_map: build.source_map,
        },
        PluginSpec::Html {
            filename: ctx.absolute(&build.index).display().to_string(),
            template: "index.html".to_string(),
            inject: true,
            minify: true,
            chunks_sort_mode: Some("dependency".to_string()),
        },
        PluginSpec::HashedModuleIds,
        PluginSpec::ModuleConcatenation,
        PluginSpec::SplitVendor {
            name: "vendor".to_string(),
        },
        PluginSpec::SplitManifest {
            name: "manifest".to_string(),
        },
        PluginSpec::SplitAsyncShared {
            source: "app".to_string(),
            async_chunk: "vendor-async".to_string(),
            min_chunks: ASYNC_SHARED_MIN_CHUNKS,
        },
        PluginSpec::CopyStatic {
            from: ctx.static_dir().display().to_string(),
            to: build.assets_sub_directory.clone(),
            ignore: vec![".*".to_string()],
        },
    ];

    if build.gzip {
        extra_plugins.push(PluginSpec::Compression {
            asset_suffix: "[path].gz[query]".to_string(),
            extensions: build.gzip_extensions.clone(),
            threshold: COMPRESSION_THRESHOLD_BYTES,
            min_ratio: COMPRESSION_MIN_RATIO,
        });
    }

    if build.bundle_report || report_requested {
        extra_plugins.push(PluginSpec::BundleReport);
    }

    EnvironmentOverlay {
        mode: Mode::Production,
        devtool: build.source_map.then(|| build.devtool.clone()),
        output: OutputOverlay {
            path: None,
            filename: Some(assets_path(
                config,
                Mode::Production,
                "js/[name].[chunkhash].js",
            )),
            chunk_filename: Some(assets_path(
                config,
                Mode::Production,
                "js/[id].[chunkhash].js",
            )),
            public_path: None,
        },
        extra_rules: style_rules(ChainOptions {
            source_map: build.source_map,
            post_process: true,
            extract: true,
        }),
        extra_plugins,
        extra_entries: BTreeMap::new(),
        extra_aliases: BTreeMap::new(),
        dev_server: None,
    }
}
