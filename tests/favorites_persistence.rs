// Favorites persisted through the file-backed store.

use snipdeck::cli::commands::toggle_favorite;
use snipdeck::models::favorites::FAVORITES_KEY;
use snipdeck::models::{FavoritesStore, FileStore, KeyValueStore};
use std::fs;

fn store_in(dir: &std::path::Path) -> FavoritesStore {
    FavoritesStore::new(Box::new(FileStore::with_dir(dir.to_path_buf()).unwrap()))
}

#[test]
fn malformed_file_initializes_empty() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("favorites.json"), "{ not: json ]").unwrap();

    assert!(store_in(dir.path()).load().is_empty());
}

#[test]
fn toggles_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();

    assert!(toggle_favorite(&store_in(dir.path()), "py-quicksort"));
    assert!(toggle_favorite(&store_in(dir.path()), "go-sort-slice"));

    let reloaded = store_in(dir.path()).load();
    assert!(reloaded.contains("py-quicksort"));
    assert!(reloaded.contains("go-sort-slice"));
    assert_eq!(reloaded.len(), 2);
}

#[test]
fn double_toggle_restores_persisted_set() {
    let dir = tempfile::tempdir().unwrap();
    let backend = FileStore::with_dir(dir.path().to_path_buf()).unwrap();
    backend.write(FAVORITES_KEY, "[\"keep\"]").unwrap();

    let store = store_in(dir.path());
    let original = store.load();

    toggle_favorite(&store, "x");
    toggle_favorite(&store, "x");

    assert_eq!(store.load(), original);
    let raw = backend.read(FAVORITES_KEY).unwrap().unwrap();
    let ids: Vec<String> = serde_json::from_str(&raw).unwrap();
    assert_eq!(ids, vec!["keep".to_string()]);
}
