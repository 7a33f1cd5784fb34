//! Storage wrapper over real backends.

use std::fs;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use knack_config::KnackConfig;
use knack_utils::{FileStore, MemoryStore, Storage, UnavailableStore};

use crate::common::Sandbox;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ShowcaseState {
    dark_mode: bool,
    progress: u8,
    selected_tab: String,
}

fn state() -> ShowcaseState {
    ShowcaseState {
        dark_mode: true,
        progress: 66,
        selected_tab: "alerts".into(),
    }
}

#[test]
fn file_backed_state_survives_reopen() {
    let sandbox = Sandbox::new();

    let storage = Storage::new(FileStore::open(sandbox.store_path()));
    assert!(storage.set_item("showcase", &state()));
    drop(storage);

    let reopened = Storage::new(FileStore::open(sandbox.store_path()));
    let fallback = ShowcaseState {
        dark_mode: false,
        progress: 0,
        selected_tab: String::new(),
    };
    assert_eq!(reopened.get_item("showcase", fallback), state());
}

#[test]
fn corrupt_store_file_falls_back_without_error() {
    let sandbox = Sandbox::new();
    fs::write(sandbox.store_path(), "{{{{").expect("seed");

    let storage = Storage::new(FileStore::open(sandbox.store_path()));
    assert_eq!(storage.get_item("anything", json!(null)), Value::Null);
    assert!(!storage.set_item("anything", &1));
    assert!(storage.read::<Value>("anything").is_err());
}

#[test]
fn unavailable_store_returns_fallback() {
    let storage = Storage::new(UnavailableStore);
    assert_eq!(storage.get_item("k", 5_i32), 5);
}

#[test]
fn quota_exceeded_write_is_swallowed_and_old_value_kept() {
    let storage = Storage::new(MemoryStore::with_quota(16));
    assert!(storage.set_item("k", "short"));
    assert!(!storage.set_item("k", "this value is far too long"));
    assert_eq!(storage.get_item("k", String::new()), "short");
}

#[test]
fn configured_path_drives_file_store() {
    let sandbox = Sandbox::new();
    let config_path = sandbox.write_config("file");
    let config = KnackConfig::load_from(&config_path)
        .expect("load")
        .expect("config present");

    let path = config.storage.resolved_path().expect("path");
    let storage = Storage::new(FileStore::open(path));
    assert!(storage.set_item("n", &3));
    assert!(sandbox.store_path().exists());
}
