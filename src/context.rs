//! Project context resolution for kiln.
//!
//! This module finds the project root (the nearest ancestor directory
//! containing `kiln.yaml`) from any working directory and resolves the paths
//! the pipeline needs. All kiln commands go through this module so that
//! operations target the same project regardless of where the command is
//! invoked from.

use crate::error::{KilnError, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Config file name looked up at the project root.
pub const CONFIG_FILE: &str = "kiln.yaml";

/// Source directory for static assets copied verbatim into the output.
pub const STATIC_DIR: &str = "static";

/// Scratch directory for merged descriptor handoff files.
pub const SCRATCH_DIR: &str = ".kiln";

/// Resolved paths for a kiln project.
///
/// All paths are absolute.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    /// Absolute path to the project root (directory containing `kiln.yaml`).
    pub project_root: PathBuf,
}

impl ProjectContext {
    /// Resolve the project context from the current working directory.
    pub fn resolve() -> Result<Self> {
        let cwd = env::current_dir().map_err(|e| {
            KilnError::Config(format!("failed to get current working directory: {}", e))
        })?;

        Self::resolve_from(&cwd)
    }

    /// Resolve the project context from a specific directory.
    ///
    /// Walks up from `cwd` until a directory containing `kiln.yaml` is
    /// found. This handles invocation from nested source directories.
    pub fn resolve_from<P: AsRef<Path>>(cwd: P) -> Result<Self> {
        let cwd = cwd.as_ref();

        let mut dir = Some(cwd.to_path_buf());
        while let Some(current) = dir {
            if current.join(CONFIG_FILE).is_file() {
                return Ok(Self {
                    project_root: current,
                });
            }
            dir = current.parent().map(Path::to_path_buf);
        }

        Err(KilnError::Config(format!(
            "no {} found in '{}' or any parent directory.\n\n\
             Run kiln from inside a project, or create a {} at the project root.",
            CONFIG_FILE,
            cwd.display(),
            CONFIG_FILE
        )))
    }

    /// Get the path to the config file.
    pub fn config_path(&self) -> PathBuf {
        self.project_root.join(CONFIG_FILE)
    }

    /// Get the path to the static assets source directory.
    pub fn static_dir(&self) -> PathBuf {
        self.project_root.join(STATIC_DIR)
    }

    /// Get the path to the scratch directory for descriptor handoff files.
    pub fn scratch_dir(&self) -> PathBuf {
        self.project_root.join(SCRATCH_DIR)
    }

    /// Get the handoff path for a merged descriptor in the given mode.
    pub fn merged_config_path(&self, mode: crate::config::Mode) -> PathBuf {
        self.scratch_dir().join(format!("merged.{}.json", mode))
    }

    /// Resolve a project-relative path (absolute paths pass through).
    pub fn absolute<P: AsRef<Path>>(&self, rel: P) -> PathBuf {
        let rel = rel.as_ref();
        if rel.is_absolute() {
            rel.to_path_buf()
        } else {
            self.project_root.join(rel)
        }
    }
}

/// Convenience function to resolve context and load the project config.
///
/// Use this in commands: it fails with a single descriptive error when the
/// project or its config cannot be resolved.
pub fn require_project() -> Result<(ProjectContext, crate::config::Config)> {
    let ctx = ProjectContext::resolve()?;
    let config = crate::config::Config::load(ctx.config_path())?;
    Ok((ctx, config))
}
