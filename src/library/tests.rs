use super::scan;
use crate::config::LibrarySettings;
use std::fs;
use tempfile::tempdir;

#[test]
fn directory_without_matching_files_is_an_empty_catalog() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("cover.jpg"), b"x").unwrap();
    fs::write(dir.path().join("track.flac"), b"x").unwrap();
    fs::write(dir.path().join("readme"), b"x").unwrap();

    assert!(scan(dir.path(), &LibrarySettings::default()).is_empty());
}

#[test]
fn missing_directory_is_an_empty_catalog() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");

    assert!(scan(&missing, &LibrarySettings::default()).is_empty());
}

#[test]
fn rescanning_reflects_changes_on_disk() {
    let dir = tempdir().unwrap();
    let settings = LibrarySettings::default();
    fs::write(dir.path().join("one.mp3"), b"x").unwrap();
    assert_eq!(scan(dir.path(), &settings).len(), 1);

    fs::write(dir.path().join("two.mp3"), b"x").unwrap();
    assert_eq!(scan(dir.path(), &settings).len(), 2);

    fs::remove_file(dir.path().join("one.mp3")).unwrap();
    let tracks = scan(dir.path(), &settings);
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].file_name, "two.mp3");
}
