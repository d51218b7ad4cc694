//! Descriptor struct definitions.
//!
//! Everything here serializes to the JSON contract the engine consumes.
//! Template strings keep their engine placeholders (`[name]`, `[chunkhash]`,
//! `[contenthash]`, `[id]`, `[ext]`) verbatim.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::Mode;

/// Environment-independent build inputs and outputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildDescriptor {
    /// Absolute project root all relative paths resolve against.
    pub context: String,

    /// Entry points: chunk name to source path.
    pub entries: BTreeMap<String, String>,

    /// Output location and filename templates.
    pub output: OutputSettings,

    /// Module resolution settings.
    pub resolve: ResolveSettings,

    /// Ordered module rules (match pattern plus transform chain).
    pub rules: Vec<ModuleRule>,

    /// Plugins shared by every environment (none in the default profile;
    /// environment overlays contribute theirs).
    pub plugins: Vec<PluginSpec>,
}

/// Output path and filename templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Absolute output root.
    pub path: String,

    /// Filename template for entry chunks.
    pub filename: String,

    /// Filename template for split (lazy-loaded) chunks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_filename: Option<String>,

    /// Public path prefix emitted into asset references.
    pub public_path: String,
}

/// Module resolution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveSettings {
    /// Extensions that may be omitted in import specifiers.
    pub extensions: Vec<String>,

    /// Import aliases: prefix to project-relative path.
    pub aliases: BTreeMap<String, String>,
}

/// A single module rule: which sources it matches and how they transform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleRule {
    /// Regular expression matched against the module path.
    pub test: String,

    /// Run this rule before normal-stage rules (lint-style rules).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enforce: Option<String>,

    /// Restrict the rule to these project-relative directories.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,

    /// The transform chain applied to matched modules.
    pub chain: TransformChain,
}

impl ModuleRule {
    /// A rule matching files with the given extension (no leading dot).
    pub fn for_extension(ext: &str, chain: TransformChain) -> Self {
        Self {
            test: format!(r"\.{}$", ext),
            enforce: None,
            include: Vec::new(),
            chain,
        }
    }

    /// Whether this rule carries a style chain (inline or extracted).
    pub fn is_style_rule(&self) -> bool {
        !matches!(self.chain.delivery, ChainDelivery::Direct)
    }
}

/// An ordered transform chain and how its output is delivered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformChain {
    /// Delivery wrapping. Changing it never reorders `steps`.
    pub delivery: ChainDelivery,

    /// Transform steps, interpreter first, preprocessor (if any) last.
    pub steps: Vec<TransformStep>,
}

impl TransformChain {
    /// A chain with no wrapping (scripts, binary assets).
    pub fn direct(steps: Vec<TransformStep>) -> Self {
        Self {
            delivery: ChainDelivery::Direct,
            steps,
        }
    }
}

/// How a chain's output reaches the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChainDelivery {
    /// Output is used as-is (non-style rules).
    Direct,
    /// Output is injected at runtime by the named injector step.
    Inline { injector: String },
    /// Output is extracted into a standalone artifact; the named injector
    /// serves as the fallback for chunks the extractor skips.
    Extract { fallback: String },
}

/// One transform step: a named transformer plus its options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformStep {
    /// Transformer name (e.g. "css", "postcss", "sass", "babel", "url").
    pub name: String,

    /// Transformer options, passed through to the engine untouched.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, serde_json::Value>,
}

impl TransformStep {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: BTreeMap::new(),
        }
    }

    pub fn with_option(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.options.insert(key.to_string(), value.into());
        self
    }
}

/// Declarative plugin descriptions consumed by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum PluginSpec {
    /// Bake the active mode into the bundle as a compile-time constant.
    DefineEnv { mode: String },

    /// Hot module replacement (development only).
    HotModuleReplacement,

    /// Stable, readable module names in hot-update output.
    NamedModules,

    /// Skip emitting output when compilation has errors.
    NoEmitOnErrors,

    /// Friendly compile reporting with a success banner.
    FriendlyErrors {
        success_messages: Vec<String>,
        notify_on_errors: bool,
    },

    /// Generate the HTML entry document with asset references injected.
    Html {
        filename: String,
        template: String,
        inject: bool,
        minify: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        chunks_sort_mode: Option<String>,
    },

    /// Copy static assets verbatim into the output.
    CopyStatic {
        from: String,
        to: String,
        ignore: Vec<String>,
    },

    /// Minify emitted scripts.
    Minify { source_map: bool, parallel: bool },

    /// Extract style chains into standalone artifacts.
    ExtractStyles { filename: String, all_chunks: bool },

    /// Minify and dedupe extracted styles.
    OptimizeStyles { source_map: bool },

    /// Digest-based module ids, stable across unrelated edits.
    HashedModuleIds,

    /// Hoist module scopes where safe.
    ModuleConcatenation,

    /// Split third-party modules into a named vendor chunk.
    SplitVendor {
        #[serde(rename = "chunk")]
        name: String,
    },

    /// Split the engine runtime manifest into its own chunk so vendor
    /// hashes survive app-only edits.
    SplitManifest {
        #[serde(rename = "chunk")]
        name: String,
    },

    /// Bundle chunks shared by at least `min_chunks` lazy-loaded children
    /// of `source` into a standalone async chunk.
    SplitAsyncShared {
        source: String,
        async_chunk: String,
        min_chunks: u32,
    },

    /// Emit compressed copies of matching artifacts.
    Compression {
        asset_suffix: String,
        extensions: Vec<String>,
        threshold: u64,
        min_ratio: f64,
    },

    /// Generate the bundle-analysis report.
    BundleReport,
}

/// Development server descriptor handed to the dev server collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevServerSettings {
    /// Client console verbosity.
    pub client_log_level: String,

    /// History-API fallback rewrites (single-page routing).
    pub history_rewrites: Vec<RewriteRule>,

    /// Hot module replacement.
    pub hot: bool,

    /// Serve a static content base directly (off: static assets are copied
    /// by the copy plugin instead).
    pub content_base: bool,

    /// Gzip responses.
    pub compress: bool,

    /// Bind host.
    pub host: String,

    /// Bind port (already probed free at descriptor construction).
    pub port: u16,

    /// Open a browser tab on startup.
    pub open: bool,

    /// Full-screen browser overlay settings; absent disables the overlay.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay: Option<ErrorOverlay>,

    /// Public path prefix for served assets.
    pub public_path: String,

    /// Proxy table: request path prefix to upstream target.
    pub proxy: BTreeMap<String, String>,

    /// Suppress the server's own compile output (the friendly reporter
    /// owns the terminal).
    pub quiet: bool,

    /// Use filesystem polling for watching.
    pub watch_poll: bool,
}

/// A single history-API fallback rewrite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewriteRule {
    /// Regular expression matched against the request path.
    pub from: String,

    /// Rewrite target.
    pub to: String,
}

/// Which severities trigger the full-screen browser overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorOverlay {
    pub warnings: bool,
    pub errors: bool,
}

/// A fully merged, environment-specific configuration.
///
/// This is the JSON the engine receives. It is immutable after
/// construction; the pipeline writes it to the handoff file and never
/// touches it again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergedConfig {
    /// Active environment.
    pub mode: Mode,

    /// Source map flavor; absent disables source maps entirely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub devtool: Option<String>,

    /// Absolute project root.
    pub context: String,

    /// Entry points after mapping merge.
    pub entries: BTreeMap<String, String>,

    /// Output settings after scalar overrides.
    pub output: OutputSettings,

    /// Resolution settings after mapping merge.
    pub resolve: ResolveSettings,

    /// Base rules followed by overlay rules (concatenation).
    pub rules: Vec<ModuleRule>,

    /// Base plugins followed by overlay plugins (concatenation).
    pub plugins: Vec<PluginSpec>,

    /// Present in development mode only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev_server: Option<DevServerSettings>,
}

impl MergedConfig {
    /// Serialize for the engine handoff file.
    pub fn to_json(&self) -> crate::error::Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            crate::error::KilnError::Config(format!(
                "failed to serialize merged config: {}",
                e
            ))
        })
    }

    /// The style rules of the merged result.
    pub fn style_rules(&self) -> impl Iterator<Item = &ModuleRule> {
        self.rules.iter().filter(|r| r.is_style_rule())
    }
}
