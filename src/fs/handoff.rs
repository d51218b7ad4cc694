//! Handoff file writes for merged descriptors.
//!
//! The merged configuration is written to a temporary file in the target
//! directory, synced, and renamed into place so the engine never observes a
//! partially-written descriptor.

use crate::error::{KilnError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Write `content` to `path`, replacing any previous handoff file.
pub fn write_handoff<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            KilnError::Config(format!(
                "failed to create directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| KilnError::Config(format!("invalid handoff path '{}'", path.display())))?;
    let temp_path = path
        .parent()
        .unwrap_or(Path::new("."))
        .join(format!(".{}.tmp", file_name));

    let mut file = File::create(&temp_path).map_err(|e| {
        KilnError::Config(format!(
            "failed to create '{}': {}",
            temp_path.display(),
            e
        ))
    })?;
    file.write_all(content.as_bytes())
        .and_then(|_| file.sync_all())
        .map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            KilnError::Config(format!("failed to write '{}': {}", temp_path.display(), e))
        })?;
    drop(file);

    // rename replaces an existing target on POSIX; on Windows remove the
    // stale handoff first.
    if let Err(first) = fs::rename(&temp_path, path) {
        if path.exists() {
            let _ = fs::remove_file(path);
        }
        fs::rename(&temp_path, path).map_err(|_| {
            let _ = fs::remove_file(&temp_path);
            KilnError::Config(format!(
                "failed to move handoff into place at '{}': {}",
                path.display(),
                first
            ))
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_handoff_new_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".kiln").join("merged.production.json");

        write_handoff(&path, "{\"mode\":\"production\"}").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "{\"mode\":\"production\"}");
    }

    #[test]
    fn test_write_handoff_replaces_previous() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("merged.json");

        write_handoff(&path, "old").unwrap();
        write_handoff(&path, "new").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_write_handoff_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("merged.json");

        write_handoff(&path, "content").unwrap();

        assert!(!temp_dir.path().join(".merged.json.tmp").exists());
    }
}
