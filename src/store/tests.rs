use std::path::{Path, PathBuf};

use tempfile::tempdir;

use super::*;
use crate::config::StorageSettings;

fn sample_catalog() -> Catalog {
    let mut cat = Catalog::new();
    cat.sign_in("ada", "pw");
    cat.upload_track("Song", Path::new("/music/song.mp3"), None, 90);
    let track = cat.feed_order()[0].clone();
    cat.toggle_like(&track);
    cat.create_playlist("Mix", &["house".to_string()], Some(&track));
    cat
}

#[test]
fn save_then_load_round_trips_the_catalog() {
    let dir = tempdir().unwrap();
    let store = Store::at(&dir.path().join("nested").join("library.json"));

    let cat = sample_catalog();
    store.save(&cat).unwrap();

    let loaded = store.load().unwrap().unwrap();
    assert_eq!(loaded.feed_order(), cat.feed_order());
    let track = cat.feed_order()[0].clone();
    assert_eq!(loaded.track(&track), cat.track(&track));
    assert_eq!(loaded.playlists(), cat.playlists());
    assert_eq!(
        loaded.current_user().map(|u| u.username.clone()),
        Some("ada".to_string())
    );
}

#[test]
fn load_returns_none_when_no_snapshot_exists() {
    let dir = tempdir().unwrap();
    let store = Store::at(&dir.path().join("library.json"));
    assert!(store.load().unwrap().is_none());
}

#[test]
fn load_reports_corrupt_snapshots() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("library.json");
    std::fs::write(&path, b"not json at all").unwrap();

    let err = Store::at(&path).load().unwrap_err();
    assert!(matches!(err, StoreError::Json(_)));
}

#[test]
fn save_leaves_no_temp_file_behind() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("library.json");
    Store::at(&path).save(&sample_catalog()).unwrap();

    assert!(path.exists());
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn settings_override_wins_over_defaults() {
    let settings = StorageSettings {
        data_path: Some(PathBuf::from("/tmp/elsewhere.json")),
    };
    assert_eq!(
        resolve_data_path(&settings),
        Some(PathBuf::from("/tmp/elsewhere.json"))
    );
}
