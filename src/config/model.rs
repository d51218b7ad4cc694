//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration for a kiln project.
///
/// This struct represents the contents of `kiln.yaml` at the project root.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Bundle entry points: chunk name to project-relative source path.
    #[serde(default = "default_entries")]
    pub entries: BTreeMap<String, String>,

    /// Module resolution settings (extensions, aliases).
    #[serde(default)]
    pub resolve: ResolveConfig,

    /// Development server and dev-mode build settings.
    #[serde(default)]
    pub dev: DevConfig,

    /// Production build settings.
    #[serde(default)]
    pub build: BuildConfig,

    /// External engine commands.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Version gate settings.
    #[serde(default)]
    pub preflight: PreflightConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            entries: default_entries(),
            resolve: ResolveConfig::default(),
            dev: DevConfig::default(),
            build: BuildConfig::default(),
            engine: EngineConfig::default(),
            preflight: PreflightConfig::default(),
        }
    }
}
