use super::*;
use crate::state::test_helpers::dummy_cell;

#[test]
fn load_returns_none_when_never_saved() {
    let store = MemoryStore::new();
    assert!(load_layout(&store).is_none());
}

#[test]
fn save_then_load_round_trips() {
    let store = MemoryStore::new();
    let cells = vec![dummy_cell("1700000000000"), dummy_cell("1700000000001")];

    save_layout(&store, &cells).unwrap();
    assert_eq!(load_layout(&store), Some(cells));
}

#[test]
fn explicit_save_of_empty_collection_loads_as_empty_not_none() {
    let store = MemoryStore::new();
    save_layout(&store, &[]).unwrap();
    assert_eq!(load_layout(&store), Some(Vec::new()));
}

#[test]
fn save_overwrites_prior_snapshot() {
    let store = MemoryStore::new();
    save_layout(&store, &[dummy_cell("1"), dummy_cell("2")]).unwrap();
    save_layout(&store, &[dummy_cell("3")]).unwrap();

    let loaded = load_layout(&store).unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id, "3");
}

#[test]
fn malformed_snapshot_loads_as_none() {
    let store = MemoryStore::new();
    store.set(STORAGE_KEY, "{not json at all").unwrap();
    assert!(load_layout(&store).is_none());

    // Valid JSON of the wrong shape is equally unusable.
    store.set(STORAGE_KEY, r#"{"cells": 7}"#).unwrap();
    assert!(load_layout(&store).is_none());
}

#[test]
fn clear_is_idempotent() {
    let store = MemoryStore::new();
    save_layout(&store, &[dummy_cell("1")]).unwrap();

    clear_layout(&store).unwrap();
    assert!(load_layout(&store).is_none());
    // Clearing again must still succeed.
    clear_layout(&store).unwrap();
}

#[test]
fn file_store_round_trips_through_a_real_directory() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());

    assert!(store.get(STORAGE_KEY).unwrap().is_none());
    store.set(STORAGE_KEY, "[1,2]").unwrap();
    assert_eq!(store.get(STORAGE_KEY).unwrap().as_deref(), Some("[1,2]"));

    // One file per key, named after it.
    assert!(dir.path().join("production-cells.json").is_file());

    store.delete(STORAGE_KEY).unwrap();
    assert!(store.get(STORAGE_KEY).unwrap().is_none());
    // Deleting a missing key still succeeds.
    store.delete(STORAGE_KEY).unwrap();
}

#[test]
fn file_store_creates_data_dir_on_first_write() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("data").join("lineboard");
    let store = FileStore::new(&nested);

    store.set(STORAGE_KEY, "[]").unwrap();
    assert!(nested.is_dir());
}

#[test]
fn layout_snapshot_survives_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    let cells = vec![dummy_cell("1700000000000")];

    save_layout(&store, &cells).unwrap();
    assert_eq!(load_layout(&store), Some(cells));
}
