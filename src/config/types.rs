//! Configuration types and defaults for kiln.
//!
//! This module defines the section structs, enums, and default value
//! functions used by the Config struct.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Build environment selector.
///
/// Exactly one mode is active per invocation; it is passed by value through
/// the pipeline rather than read from a process-wide global.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Development,
    Production,
}

impl Mode {
    /// The string form exported to the engine child process.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Development => "development",
            Mode::Production => "production",
        }
    }

    /// Parse a mode from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "development" | "dev" => Some(Self::Development),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Development server and dev-mode build settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DevConfig {
    /// Subdirectory for copied static assets, relative to the served root.
    pub assets_sub_directory: String,

    /// Public path prefix served assets are referenced under.
    pub assets_public_path: String,

    /// Proxy table: request path prefix to upstream target.
    pub proxy: BTreeMap<String, String>,

    /// Development server bind host (overridable via the HOST env var).
    pub host: String,

    /// Development server port (overridable via PORT; if taken, a free one
    /// is probed for automatically).
    pub port: u16,

    /// Open a browser tab once the server is up.
    pub auto_open_browser: bool,

    /// Show full-screen overlay in the browser on compile errors.
    pub error_overlay: bool,

    /// Notify on compile errors via the friendly-errors reporter.
    pub notify_on_errors: bool,

    /// Use filesystem polling for watch (for environments without inotify).
    pub poll: bool,

    /// Lint sources during bundling.
    pub use_lint: bool,

    /// Also surface lint errors in the browser error overlay.
    pub show_lint_errors_in_overlay: bool,

    /// Source map flavor for development.
    pub devtool: String,

    /// Append cache-busting queries to dev asset requests.
    pub cache_busting: bool,

    /// Emit source maps for styles in development.
    pub css_source_map: bool,
}

impl Default for DevConfig {
    fn default() -> Self {
        Self {
            assets_sub_directory: default_assets_sub_directory(),
            assets_public_path: default_assets_public_path(),
            proxy: BTreeMap::new(),
            host: default_host(),
            port: default_port(),
            auto_open_browser: false,
            error_overlay: true,
            notify_on_errors: true,
            poll: false,
            use_lint: true,
            show_lint_errors_in_overlay: false,
            devtool: default_dev_devtool(),
            cache_busting: true,
            css_source_map: true,
        }
    }
}

/// Production build settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Generated HTML entry document, relative to the project root.
    pub index: String,

    /// Output root for built artifacts, relative to the project root.
    pub assets_root: String,

    /// Subdirectory under the output root for hashed assets.
    pub assets_sub_directory: String,

    /// Public path prefix built assets are referenced under.
    pub assets_public_path: String,

    /// Emit production source maps.
    pub source_map: bool,

    /// Source map flavor for production.
    pub devtool: String,

    /// Emit gzip-compressed copies of matching artifacts.
    pub gzip: bool,

    /// Artifact extensions eligible for gzip compression (no leading dots).
    pub gzip_extensions: Vec<String>,

    /// Always generate the bundle-analysis report (KILN_REPORT also enables
    /// it per invocation).
    pub bundle_report: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            index: default_index(),
            assets_root: default_assets_root(),
            assets_sub_directory: default_assets_sub_directory(),
            assets_public_path: default_assets_public_path(),
            source_map: true,
            devtool: default_build_devtool(),
            gzip: false,
            gzip_extensions: default_gzip_extensions(),
            bundle_report: false,
        }
    }
}

/// Module resolution settings shared by both environments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveConfig {
    /// Extensions that may be omitted in import specifiers.
    pub extensions: Vec<String>,

    /// Import aliases: prefix to project-relative path.
    pub aliases: BTreeMap<String, String>,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            extensions: default_resolve_extensions(),
            aliases: default_aliases(),
        }
    }
}

/// External engine commands (shell-words parsed; no shell).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Command invoked for `kiln build`.
    pub build_command: String,

    /// Command invoked for `kiln serve`.
    pub serve_command: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            build_command: default_build_command(),
            serve_command: default_serve_command(),
        }
    }
}

/// Version gate settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreflightConfig {
    /// Tools checked before a production build.
    pub tools: Vec<ToolRequirement>,
}

impl Default for PreflightConfig {
    fn default() -> Self {
        Self {
            tools: default_tools(),
        }
    }
}

/// A single tracked tool for the version gate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolRequirement {
    /// Display name (e.g. "node").
    pub name: String,

    /// Command that prints the tool's version (shell-words parsed).
    pub version_command: String,

    /// Semver range the current version must satisfy.
    pub requirement: String,

    /// Skip (rather than fail) this tool when its executable is absent.
    pub optional: bool,
}

// Default value functions for serde
pub(crate) fn default_assets_sub_directory() -> String {
    "static".to_string()
}
pub(crate) fn default_assets_public_path() -> String {
    "/".to_string()
}
pub(crate) fn default_host() -> String {
    "localhost".to_string()
}
pub(crate) fn default_port() -> u16 {
    8080
}
pub(crate) fn default_dev_devtool() -> String {
    "cheap-module-eval-source-map".to_string()
}
pub(crate) fn default_index() -> String {
    "dist/index.html".to_string()
}
pub(crate) fn default_assets_root() -> String {
    "dist".to_string()
}
pub(crate) fn default_build_devtool() -> String {
    "source-map".to_string()
}
pub(crate) fn default_gzip_extensions() -> Vec<String> {
    vec!["js".to_string(), "css".to_string()]
}
pub(crate) fn default_resolve_extensions() -> Vec<String> {
    vec![".js".to_string(), ".json".to_string()]
}
pub(crate) fn default_aliases() -> BTreeMap<String, String> {
    BTreeMap::from([("@".to_string(), "src".to_string())])
}
pub(crate) fn default_build_command() -> String {
    "webpack".to_string()
}
pub(crate) fn default_serve_command() -> String {
    "webpack-dev-server".to_string()
}
pub(crate) fn default_entries() -> BTreeMap<String, String> {
    BTreeMap::from([("app".to_string(), "src/main.js".to_string())])
}

/// Default tracked tools: the host runtime plus its package manager.
pub(crate) fn default_tools() -> Vec<ToolRequirement> {
    vec![
        ToolRequirement {
            name: "node".to_string(),
            version_command: "node --version".to_string(),
            requirement: ">=6.0.0".to_string(),
            optional: false,
        },
        ToolRequirement {
            name: "npm".to_string(),
            version_command: "npm --version".to_string(),
            requirement: ">=3.0.0".to_string(),
            optional: true,
        },
    ]
}
