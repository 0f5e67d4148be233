// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! String key-value stores.
//!
//! [`FileKvStore`] keeps one JSON file per key in a state directory;
//! [`MemoryKvStore`] backs tests and ephemeral sessions.

use crate::StorageError;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Durable string-to-string storage
pub trait KvStore: Clone + Send + Sync + 'static {
    /// Value stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Move an unreadable value out of the way, keeping it for inspection.
    fn quarantine(&self, key: &str) -> Result<(), StorageError>;
}

fn check_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

const MAX_BAK_FILES: u32 = 3;

/// Pick the next `.bak` / `.bak.N` path, rotating older backups out.
///
/// Keeps up to [`MAX_BAK_FILES`] backups: `.bak`, `.bak.2`, `.bak.3`.
pub(crate) fn rotate_bak_path(path: &Path) -> PathBuf {
    let bak = |n: u32| {
        if n == 1 {
            path.with_extension("bak")
        } else {
            path.with_extension(format!("bak.{n}"))
        }
    };

    let oldest = bak(MAX_BAK_FILES);
    if oldest.exists() {
        let _ = fs::remove_file(&oldest);
    }

    for n in (1..MAX_BAK_FILES).rev() {
        let src = bak(n);
        if src.exists() {
            let _ = fs::rename(&src, bak(n + 1));
        }
    }

    bak(1)
}

/// One `{key}.json` file per key under `root`.
///
/// Writes go to a temp file that is synced and renamed over the target, so
/// a crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileKvStore {
    root: PathBuf,
}

impl FileKvStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl KvStore for FileKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        check_key(key)?;
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        check_key(key)?;
        fs::create_dir_all(&self.root)?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &path)?;
        tracing::trace!(key, bytes = value.len(), "kv write");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        check_key(key)?;
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn quarantine(&self, key: &str) -> Result<(), StorageError> {
        check_key(key)?;
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(());
        }
        let bak = rotate_bak_path(&path);
        fs::rename(&path, &bak)?;
        tracing::warn!(key, backup = %bak.display(), "moved unreadable value aside");
        Ok(())
    }
}

#[derive(Default)]
struct MemoryState {
    values: HashMap<String, String>,
    quarantined: Vec<(String, String)>,
    fail_writes: bool,
}

/// In-process store; clones share the same map.
#[derive(Clone, Default)]
pub struct MemoryKvStore {
    inner: Arc<Mutex<MemoryState>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Values moved aside by [`KvStore::quarantine`], oldest first
    pub fn quarantined(&self) -> Vec<(String, String)> {
        self.inner.lock().quarantined.clone()
    }

    /// Make every subsequent `set` fail with an I/O error
    #[cfg(any(test, feature = "test-support"))]
    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.lock().fail_writes = fail;
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        check_key(key)?;
        Ok(self.inner.lock().values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        check_key(key)?;
        let mut inner = self.inner.lock();
        if inner.fail_writes {
            return Err(std::io::Error::other("write rejected").into());
        }
        inner.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        check_key(key)?;
        self.inner.lock().values.remove(key);
        Ok(())
    }

    fn quarantine(&self, key: &str) -> Result<(), StorageError> {
        check_key(key)?;
        let mut inner = self.inner.lock();
        if let Some(value) = inner.values.remove(key) {
            inner.quarantined.push((key.to_string(), value));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "kv_tests.rs"]
mod tests;
