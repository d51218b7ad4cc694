//! Config loading, validation, and utility operations.

use super::model::Config;
use crate::error::{KilnError, Result};
use std::path::Path;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward
    /// compatibility.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            KilnError::Config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| KilnError::Config(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| KilnError::Config(format!("failed to serialize config to YAML: {}", e)))
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `entries` must be non-empty and its paths non-empty
    /// - `dev.port` must be non-zero
    /// - engine commands must be non-empty and shell-parseable
    /// - every preflight tool needs a name, a version command, and a
    ///   parseable semver requirement
    /// - `build.gzip_extensions` entries must be non-empty and have no
    ///   leading dots
    pub fn validate(&self) -> Result<()> {
        if self.entries.is_empty() {
            return Err(KilnError::Config(
                "config validation failed: entries must declare at least one entry point"
                    .to_string(),
            ));
        }
        for (name, path) in &self.entries {
            if name.is_empty() || path.is_empty() {
                return Err(KilnError::Config(format!(
                    "config validation failed: entry '{}' has an empty name or path",
                    name
                )));
            }
        }

        if self.dev.port == 0 {
            return Err(KilnError::Config(
                "config validation failed: dev.port must be greater than 0".to_string(),
            ));
        }

        for (label, command) in [
            ("engine.build_command", &self.engine.build_command),
            ("engine.serve_command", &self.engine.serve_command),
        ] {
            if command.trim().is_empty() {
                return Err(KilnError::Config(format!(
                    "config validation failed: {} must not be empty",
                    label
                )));
            }
            shell_words::split(command).map_err(|e| {
                KilnError::Config(format!(
                    "config validation failed: {} is not parseable: {}",
                    label, e
                ))
            })?;
        }

        for tool in &self.preflight.tools {
            if tool.name.is_empty() || tool.version_command.is_empty() {
                return Err(KilnError::Config(
                    "config validation failed: preflight tools need a name and a version_command"
                        .to_string(),
                ));
            }
            semver::VersionReq::parse(&tool.requirement).map_err(|e| {
                KilnError::Config(format!(
                    "config validation failed: preflight requirement '{}' for '{}' is not a valid semver range: {}",
                    tool.requirement, tool.name, e
                ))
            })?;
        }

        for ext in &self.build.gzip_extensions {
            if ext.is_empty() {
                return Err(KilnError::Config(
                    "config validation failed: gzip_extensions entries must be non-empty"
                        .to_string(),
                ));
            }
            if ext.starts_with('.') {
                return Err(KilnError::Config(format!(
                    "config validation failed: gzip_extensions entries must not have leading dots (found '{}'). Use '{}' instead.",
                    ext,
                    ext.trim_start_matches('.')
                )));
            }
        }

        Ok(())
    }

    /// The assets subdirectory for the given mode.
    pub fn assets_sub_directory(&self, mode: super::Mode) -> &str {
        match mode {
            super::Mode::Production => &self.build.assets_sub_directory,
            super::Mode::Development => &self.dev.assets_sub_directory,
        }
    }

    /// The public path prefix for the given mode.
    pub fn assets_public_path(&self, mode: super::Mode) -> &str {
        match mode {
            super::Mode::Production => &self.build.assets_public_path,
            super::Mode::Development => &self.dev.assets_public_path,
        }
    }
}
