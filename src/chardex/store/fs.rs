use super::KeyValueStore;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Durable key-value storage: one file per key under a root directory.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    /// Check that the root directory can be created and written to.
    /// Performed once, at construction time, by [`super::Store::open_at`].
    pub fn probe(&self) -> bool {
        if fs::create_dir_all(&self.root).is_err() {
            return false;
        }
        let probe_path = self.root.join(".probe");
        let ok = fs::write(&probe_path, b"probe").is_ok();
        let _ = fs::remove_file(&probe_path);
        ok
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(value) => Some(value),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read from storage");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(e) = fs::create_dir_all(&self.root) {
            tracing::warn!(key, error = %e, "failed to create storage directory");
            return;
        }
        if let Err(e) = fs::write(self.key_path(key), value) {
            tracing::warn!(key, error = %e, "failed to write to storage");
        }
    }

    fn remove(&self, key: &str) {
        match fs::remove_file(self.key_path(key)) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(key, error = %e, "failed to remove from storage"),
        }
    }
}
