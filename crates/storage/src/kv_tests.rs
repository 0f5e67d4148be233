// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::tempdir;

#[test]
fn file_store_round_trips_values() {
    let dir = tempdir().unwrap();
    let store = FileKvStore::new(dir.path().join("state"));

    assert_eq!(store.get("projects_cache").unwrap(), None);
    store.set("projects_cache", "[]").unwrap();
    assert_eq!(store.get("projects_cache").unwrap().as_deref(), Some("[]"));
    assert!(dir.path().join("state/projects_cache.json").exists());
    assert!(!dir.path().join("state/projects_cache.json.tmp").exists());
}

#[test]
fn file_store_overwrites() {
    let dir = tempdir().unwrap();
    let store = FileKvStore::new(dir.path());
    store.set("k", "one").unwrap();
    store.set("k", "two").unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));
}

#[test]
fn file_store_remove_is_idempotent() {
    let dir = tempdir().unwrap();
    let store = FileKvStore::new(dir.path());
    store.set("k", "v").unwrap();
    store.remove("k").unwrap();
    store.remove("k").unwrap();
    assert_eq!(store.get("k").unwrap(), None);
}

#[yare::parameterized(
    empty     = { "" },
    traversal = { "../etc" },
    slash     = { "a/b" },
    dotted    = { "a.json" },
)]
fn invalid_keys_rejected(key: &str) {
    let dir = tempdir().unwrap();
    let store = FileKvStore::new(dir.path());
    assert!(matches!(store.set(key, "x"), Err(StorageError::InvalidKey(_))));
    assert!(matches!(MemoryKvStore::new().get(key), Err(StorageError::InvalidKey(_))));
}

#[test]
fn quarantine_rotates_backups() {
    let dir = tempdir().unwrap();
    let store = FileKvStore::new(dir.path());

    for n in 1..=4 {
        store.set("k", &format!("bad-{n}")).unwrap();
        store.quarantine("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    let read = |name: &str| fs::read_to_string(dir.path().join(name)).unwrap();
    assert_eq!(read("k.bak"), "bad-4");
    assert_eq!(read("k.bak.2"), "bad-3");
    assert_eq!(read("k.bak.3"), "bad-2");
    assert!(!dir.path().join("k.bak.4").exists());
}

#[test]
fn quarantine_of_missing_key_is_noop() {
    let dir = tempdir().unwrap();
    let store = FileKvStore::new(dir.path());
    store.quarantine("k").unwrap();
    assert!(!dir.path().join("k.bak").exists());
}

#[test]
fn memory_store_clones_share_state() {
    let a = MemoryKvStore::new();
    let b = a.clone();
    a.set("k", "v").unwrap();
    assert_eq!(b.get("k").unwrap().as_deref(), Some("v"));

    b.quarantine("k").unwrap();
    assert_eq!(a.get("k").unwrap(), None);
    assert_eq!(a.quarantined(), vec![("k".to_string(), "v".to_string())]);
}

#[test]
fn memory_store_write_failure() {
    let store = MemoryKvStore::new();
    store.set_fail_writes(true);
    assert!(matches!(store.set("k", "v"), Err(StorageError::Io(_))));
    store.set_fail_writes(false);
    store.set("k", "v").unwrap();
}
