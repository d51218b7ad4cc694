//! The development overlay.

use std::collections::BTreeMap;

use crate::config::{Config, Mode};
use crate::context::ProjectContext;
use crate::descriptor::{
    DevServerSettings, EnvironmentOverlay, ErrorOverlay, OutputOverlay, PluginSpec, RewriteRule,
};
use crate::styles::{ChainOptions, style_rules};

/// Build the development overlay.
///
/// `host` and `port` are already resolved by the caller (env overrides
/// applied, port probed free), so the descriptor carries the address the
/// server will actually bind.
pub fn dev_overlay(
    config: &Config,
    ctx: &ProjectContext,
    host: &str,
    port: u16,
) -> EnvironmentOverlay {
    let dev = &config.dev;

    let extra_plugins = vec![
        PluginSpec::DefineEnv {
            mode: Mode::Development.as_str().to_string(),
        },
        PluginSpec::HotModuleReplacement,
        PluginSpec::NamedModules,
        PluginSpec::NoEmitOnErrors,
        PluginSpec::Html {
            filename: "index.html".to_string(),
            template: "index.html".to_string(),
            inject: true,
            minify: false,
            chunks_sort_mode: None,
        },
        PluginSpec::CopyStatic {
            from: ctx.static_dir().display().to_string(),
            to: dev.assets_sub_directory.clone(),
            ignore: vec![".*".to_string()],
        },
        PluginSpec::FriendlyErrors {
            success_messages: vec![format!(
                "Your application is running here: http://{}:{}",
                host, port
            )],
            notify_on_errors: dev.notify_on_errors,
        },
    ];

    let dev_server = DevServerSettings {
        client_log_level: "warning".to_string(),
        history_rewrites: vec![RewriteRule {
            from: ".*".to_string(),
            to: public_join(&dev.assets_public_path, "index.html"),
        }],
        hot: true,
        // Static assets are handled by the copy plugin instead.
        content_base: false,
        compress: true,
        host: host.to_string(),
        port,
        open: dev.auto_open_browser,
        overlay: dev.error_overlay.then_some(ErrorOverlay {
            warnings: false,
            errors: true,
        }),
        public_path: dev.assets_public_path.clone(),
        proxy: dev.proxy.clone(),
        // The friendly reporter owns the terminal.
        quiet: true,
        watch_poll: dev.poll,
    };

    EnvironmentOverlay {
        mode: Mode::Development,
        devtool: Some(dev.devtool.clone()),
        output: OutputOverlay::default(),
        extra_rules: style_rules(ChainOptions {
            source_map: dev.css_source_map,
            post_process: true,
            extract: false,
        }),
        extra_plugins,
        extra_entries: BTreeMap::new(),
        extra_aliases: BTreeMap::new(),
        dev_server: Some(dev_server),
    }
}

/// Join a public path prefix and a relative URL path.
fn public_join(prefix: &str, rest: &str) -> String {
    format!(
        "{}/{}",
        prefix.trim_end_matches('/'),
        rest.trim_start_matches('/')
    )
}
