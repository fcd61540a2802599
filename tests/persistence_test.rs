//! Tests for the key-value stores and the persistence gateway

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use tempfile::TempDir;

use alloctree::application::services::PersistenceGateway;
use alloctree::application::ApplicationError;
use alloctree::domain::RadialNode;
use alloctree::infrastructure::traits::{
    FileKeyValueStore, FileSystem, KeyValueStore, MemoryKeyValueStore, RealFileSystem,
};

fn snapshot() -> Vec<RadialNode> {
    vec![RadialNode::new("P", 100.0).with_children(vec![RadialNode::new("A", 100.0)
        .with_children(vec![RadialNode::new("F", 50.0)
            .with_children(vec![RadialNode::new("H", 50.0).with_price(300.0)])])])]
}

#[test]
fn given_empty_store_when_loading_then_returns_empty_snapshot() {
    let gateway = PersistenceGateway::new(Arc::new(MemoryKeyValueStore::new()), "cache", "backup");
    assert!(gateway.load().unwrap().is_empty());
    assert!(gateway.load_backup().unwrap().is_none());
}

#[test]
fn given_stored_snapshot_when_loading_then_returns_it() {
    let gateway = PersistenceGateway::new(Arc::new(MemoryKeyValueStore::new()), "cache", "backup");

    gateway.store(&snapshot()).unwrap();

    assert_eq!(gateway.load().unwrap(), snapshot());
    assert!(gateway.load_backup().unwrap().is_none(), "backup is never automatic");
}

#[test]
fn given_backup_when_loading_then_separate_from_live_key() {
    let store = Arc::new(MemoryKeyValueStore::new());
    let gateway = PersistenceGateway::new(store.clone(), "cache", "backup");

    gateway.backup(&snapshot()).unwrap();

    assert!(store.get("cache").unwrap().is_none());
    assert!(store.get("backup").unwrap().is_some());
    assert_eq!(gateway.load_backup().unwrap(), Some(snapshot()));
}

#[test]
fn given_backup_of_empty_tree_when_loading_then_some_empty() {
    let gateway = PersistenceGateway::new(Arc::new(MemoryKeyValueStore::new()), "cache", "backup");

    gateway.backup(&[]).unwrap();

    assert_eq!(gateway.load_backup().unwrap(), Some(Vec::new()));
}

#[test]
fn given_malformed_json_when_loading_then_snapshot_error() {
    let store = Arc::new(MemoryKeyValueStore::new());
    store.set("cache", "{not json").unwrap();
    let gateway = PersistenceGateway::new(store, "cache", "backup");

    let err = gateway.load().unwrap_err();

    assert!(matches!(err, ApplicationError::Snapshot { ref key, .. } if key == "cache"));
}

#[test]
fn given_file_store_when_setting_then_writes_json_file_per_key() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("nested/data");
    let store = FileKeyValueStore::new(Arc::new(RealFileSystem), &dir);

    assert!(store.get("cache").unwrap().is_none());
    store.set("cache", "[]").unwrap();
    store.set("cache", r#"[{"name":"P","value":1.0}]"#).unwrap();

    assert_eq!(
        fs::read_to_string(dir.join("cache.json")).unwrap(),
        r#"[{"name":"P","value":1.0}]"#
    );
    assert!(!dir.join("cache.json.tmp").exists());
    assert_eq!(store.path_for("backup"), dir.join("backup.json"));
}

#[test]
fn given_file_store_when_round_tripping_through_gateway_then_snapshot_preserved() {
    let temp = TempDir::new().unwrap();
    let store = Arc::new(FileKeyValueStore::new(Arc::new(RealFileSystem), temp.path()));
    let gateway = PersistenceGateway::new(store, "cache", "backup");

    gateway.store(&snapshot()).unwrap();

    assert_eq!(gateway.load().unwrap(), snapshot());
}

/// In-memory filesystem recording created directories.
#[derive(Default)]
struct InMemoryFileSystem {
    files: RwLock<HashMap<PathBuf, String>>,
    dirs: RwLock<Vec<PathBuf>>,
}

impl FileSystem for InMemoryFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files
            .read()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        self.files
            .write()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.read().unwrap().contains_key(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        self.dirs.write().unwrap().push(path.to_path_buf());
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        let mut files = self.files.write().unwrap();
        let content = files
            .remove(from)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, from.display().to_string()))?;
        files.insert(to.to_path_buf(), content);
        Ok(())
    }

    fn ensure_parent(&self, path: &Path) -> io::Result<()> {
        match path.parent() {
            Some(parent) => self.create_dir_all(parent),
            None => Ok(()),
        }
    }
}

#[test]
fn given_in_memory_filesystem_when_setting_then_stages_and_renames_into_key_file() {
    let fs = Arc::new(InMemoryFileSystem::default());
    let store = FileKeyValueStore::new(fs.clone(), "/data/alloctree");

    assert!(store.get("cache").unwrap().is_none());
    store.set("cache", "[]").unwrap();

    let files = fs.files.read().unwrap();
    assert_eq!(files.len(), 1, "staging file must be renamed away");
    assert_eq!(
        files.get(Path::new("/data/alloctree/cache.json")).map(String::as_str),
        Some("[]")
    );
    drop(files);
    assert_eq!(
        fs.dirs.read().unwrap().as_slice(),
        &[PathBuf::from("/data/alloctree")]
    );
    assert_eq!(store.get("cache").unwrap().as_deref(), Some("[]"));
}
