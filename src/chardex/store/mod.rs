//! # Storage Layer
//!
//! String-keyed key-value storage behind the [`KeyValueStore`] trait. The
//! trait is deliberately fault-free: implementations catch every underlying
//! problem (missing directory, permissions, full disk), log it, and degrade
//! silently. Nothing above this layer knows or cares whether writes stick.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: durable storage, one JSON file per key under a
//!   platform data directory.
//! - [`memory::MemoryStore`]: process-lifetime map, used as the fallback
//!   when durable storage is unavailable and for tests.
//!
//! [`Store::open`] probes for a writable data directory once, at
//! construction, and picks the variant. Call sites never branch on which
//! one is active.

use std::path::PathBuf;

pub mod fs;
pub mod memory;

/// Abstract interface for string-keyed persistence.
///
/// Implementations must never propagate faults to the caller; a failed read
/// behaves as a missing key and a failed write is dropped (and logged).
pub trait KeyValueStore {
    /// Get the value for a key, or `None` if absent or unreadable.
    fn get(&self, key: &str) -> Option<String>;

    /// Set a key to a value. Best effort.
    fn set(&self, key: &str, value: &str);

    /// Remove a key. Removing an absent key is a no-op.
    fn remove(&self, key: &str);
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

/// Storage selected once at construction: durable when the backing
/// directory is writable, volatile otherwise.
pub enum Store {
    Durable(fs::FileStore),
    Volatile(memory::MemoryStore),
}

impl Store {
    /// Probe the default data directory and pick a backend.
    pub fn open() -> Self {
        Self::open_at(default_data_dir())
    }

    /// Probe a specific directory and pick a backend.
    pub fn open_at(root: PathBuf) -> Self {
        let file_store = fs::FileStore::new(root);
        if file_store.probe() {
            Store::Durable(file_store)
        } else {
            tracing::warn!(
                root = %file_store.root().display(),
                "data directory is not writable, falling back to in-memory storage"
            );
            Store::Volatile(memory::MemoryStore::new())
        }
    }
}

impl KeyValueStore for Store {
    fn get(&self, key: &str) -> Option<String> {
        match self {
            Store::Durable(s) => s.get(key),
            Store::Volatile(s) => s.get(key),
        }
    }

    fn set(&self, key: &str, value: &str) {
        match self {
            Store::Durable(s) => s.set(key, value),
            Store::Volatile(s) => s.set(key, value),
        }
    }

    fn remove(&self, key: &str) {
        match self {
            Store::Durable(s) => s.remove(key),
            Store::Volatile(s) => s.remove(key),
        }
    }
}

/// Resolve the data directory: `CHARDEX_DATA_DIR` wins, then the platform
/// data dir, then `.chardex` under the working directory.
pub fn default_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CHARDEX_DATA_DIR") {
        return PathBuf::from(dir);
    }
    directories::ProjectDirs::from("com", "chardex", "chardex")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".chardex"))
}
