//! Helpers for tests that change the process working directory.

use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// Switches into a directory for the lifetime of the guard.
pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
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

/// Write `agents.yaml` in the current directory with one profile per role,
/// each answering with the given shell command.
pub(crate) fn write_agents_file(pm: &str, designer: &str, engineer: &str) {
    let yaml = format!(
        "agents:\n  product_manager:\n    command: {pm}\n  ui_ux_designer:\n    command: {designer}\n  frontend_engineer:\n    command: {engineer}\n"
    );
    std::fs::write("agents.yaml", yaml).unwrap();
}
