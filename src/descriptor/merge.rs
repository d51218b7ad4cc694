//! Environment overlay merging.
//!
//! `merge` combines a `BuildDescriptor` with exactly one
//! `EnvironmentOverlay` using a declared strategy per field type:
//!
//! - scalar fields (devtool, output templates) are replaced when the overlay
//!   provides a value;
//! - sequence fields (rules, plugins) are concatenated, overlay entries
//!   appended after base entries;
//! - mapping fields (entries, aliases) are merged key-wise, overlay keys
//!   winning on conflict.
//!
//! No field is silently dropped. A malformed overlay fails fast with a
//! descriptive error instead of producing a partially-merged result.

use std::collections::BTreeMap;

use crate::config::Mode;
use crate::descriptor::model::{
    BuildDescriptor, DevServerSettings, MergedConfig, ModuleRule, PluginSpec,
};
use crate::error::{KilnError, Result};

/// Environment-specific configuration fragment.
#[derive(Debug, Clone)]
pub struct EnvironmentOverlay {
    /// Environment this overlay belongs to.
    pub mode: Mode,

    /// Source map flavor; `None` disables source maps.
    pub devtool: Option<String>,

    /// Scalar output overrides.
    pub output: OutputOverlay,

    /// Rules appended after the base rules.
    pub extra_rules: Vec<ModuleRule>,

    /// Plugins appended after the base plugins.
    pub extra_plugins: Vec<PluginSpec>,

    /// Entries merged into the base entries (overlay wins on conflict).
    pub extra_entries: BTreeMap<String, String>,

    /// Aliases merged into the base aliases (overlay wins on conflict).
    pub extra_aliases: BTreeMap<String, String>,

    /// Development server descriptor; required in development mode and
    /// forbidden in production mode.
    pub dev_server: Option<DevServerSettings>,
}

/// Scalar output overrides carried by an overlay.
#[derive(Debug, Clone, Default)]
pub struct OutputOverlay {
    pub path: Option<String>,
    pub filename: Option<String>,
    pub chunk_filename: Option<String>,
    pub public_path: Option<String>,
}

impl EnvironmentOverlay {
    /// Check overlay shape before merging.
    ///
    /// Shape rules:
    /// - a development overlay must carry a dev_server record;
    /// - a production overlay must not;
    /// - every extra rule's match pattern must be a valid regular
    ///   expression;
    /// - copy-plugin ignore patterns must be valid globs.
    pub fn validate(&self) -> Result<()> {
        match (self.mode, self.dev_server.is_some()) {
            (Mode::Development, false) => {
                return Err(KilnError::Config(
                    "malformed overlay: development overlay is missing its dev_server record"
                        .to_string(),
                ));
            }
            (Mode::Production, true) => {
                return Err(KilnError::Config(
                    "malformed overlay: production overlay must not carry a dev_server record"
                        .to_string(),
                ));
            }
            _ => {}
        }

        for rule in &self.extra_rules {
            regex::Regex::new(&rule.test).map_err(|e| {
                KilnError::Config(format!(
                    "malformed overlay: rule pattern '{}' is not a valid regular expression: {}",
                    rule.test, e
                ))
            })?;
        }

        for plugin in &self.extra_plugins {
            if let PluginSpec::CopyStatic { ignore, .. } = plugin {
                for pattern in ignore {
                    globset::Glob::new(pattern).map_err(|e| {
                        KilnError::Config(format!(
                            "malformed overlay: copy ignore pattern '{}' is not a valid glob: {}",
                            pattern, e
                        ))
                    })?;
                }
            }
        }

        Ok(())
    }
}

/// Merge a base descriptor with exactly one environment overlay.
pub fn merge(base: BuildDescriptor, overlay: EnvironmentOverlay) -> Result<MergedConfig> {
    overlay.validate()?;

    let BuildDescriptor {
        context,
        mut entries,
        mut output,
        mut resolve,
        mut rules,
        mut plugins,
    } = base;

    // Scalars: overlay value replaces the base value when present.
    if let Some(path) = overlay.output.path {
        output.path = path;
    }
    if let Some(filename) = overlay.output.filename {
        output.filename = filename;
    }
    if let Some(chunk_filename) = overlay.output.chunk_filename {
        output.chunk_filename = Some(chunk_filename);
    }
    if let Some(public_path) = overlay.output.public_path {
        output.public_path = public_path;
    }

    // Sequences: base entries first, overlay entries appended.
    rules.extend(overlay.extra_rules);
    plugins.extend(overlay.extra_plugins);

    // Mappings: key-wise merge, overlay precedence.
    entries.extend(overlay.extra_entries);
    resolve.aliases.extend(overlay.extra_aliases);

    let merged = MergedConfig {
        mode: overlay.mode,
        devtool: overlay.devtool,
        context,
        entries,
        output,
        resolve,
        rules,
        plugins,
        dev_server: overlay.dev_server,
    };

    validate_merged(&merged)?;
    Ok(merged)
}

/// Reject merged results a bare base descriptor would produce.
///
/// A descriptor without an overlay has no style rules and no
/// environment-specific output handling; such a config is unusable and must
/// never reach the engine.
fn validate_merged(merged: &MergedConfig) -> Result<()> {
    if merged.style_rules().next().is_none() {
        return Err(KilnError::Config(
            "incomplete merged config: no style rules present (no environment overlay applied?)"
                .to_string(),
        ));
    }

    if merged.entries.is_empty() {
        return Err(KilnError::Config(
            "incomplete merged config: no entry points".to_string(),
        ));
    }

    if merged.output.filename.is_empty() {
        return Err(KilnError::Config(
            "incomplete merged config: empty output filename template".to_string(),
        ));
    }

    Ok(())
}
