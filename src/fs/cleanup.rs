//! Output directory cleanup.

use crate::error::{KilnError, Result};
use std::fs;
use std::path::Path;

/// Remove a directory tree if it exists.
///
/// A missing target is not an error: the first build of a project has
/// nothing to clean. Any other failure is fatal and aborts the build before
/// the engine runs.
pub fn remove_tree<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(());
    }

    if !path.is_dir() {
        return Err(KilnError::Cleanup(format!(
            "'{}' exists but is not a directory",
            path.display()
        )));
    }

    fs::remove_dir_all(path).map_err(|e| {
        KilnError::Cleanup(format!("could not remove '{}': {}", path.display(), e))
    })
}
