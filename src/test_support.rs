use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};
use tempfile::TempDir;

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // The process working directory is global state; serialize changes so
        // concurrently running tests cannot race each other.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// Create a minimal kiln project in a temp directory: config file, an entry
/// source, the HTML template, and a static asset.
pub(crate) fn create_test_project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path();

    std::fs::write(
        path.join("kiln.yaml"),
        "dev:\n  port: 8080\nbuild:\n  assets_root: dist\n",
    )
    .unwrap();

    std::fs::create_dir_all(path.join("src")).unwrap();
    std::fs::write(
        path.join("src").join("main.js"),
        "document.body.textContent = 'hello'\n",
    )
    .unwrap();

    std::fs::write(
        path.join("index.html"),
        "<!DOCTYPE html><html><body></body></html>\n",
    )
    .unwrap();

    std::fs::create_dir_all(path.join("static")).unwrap();
    std::fs::write(path.join("static").join("robots.txt"), "User-agent: *\n").unwrap();

    temp_dir
}
