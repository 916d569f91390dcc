use std::path::Path;

use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::Track;

fn wanted_extension(settings: &LibrarySettings) -> String {
    settings
        .extension
        .trim()
        .trim_start_matches('.')
        .to_ascii_lowercase()
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|e| e.eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}

/// Whether a walk error is about the music directory itself rather than one of its entries.
fn lists_root(err: &walkdir::Error) -> bool {
    err.depth() == 0
}

/// List the files directly inside `dir` whose extension matches the configured one.
///
/// Entries come back in directory enumeration order. A missing or unreadable
/// directory yields an empty catalog; deciding what "no tracks" means is up to
/// the caller.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<Track> {
    let ext = wanted_extension(settings);
    let mut tracks: Vec<Track> = Vec::new();

    // Depth 1 only: the directory's own entries, no recursion.
    let walker = WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true);

    for entry in walker.into_iter() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) if lists_root(&e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "cannot list music directory");
                continue;
            }
            Err(e) => {
                let path = e.path().unwrap_or(dir);
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };

        let path = entry.path();
        if entry.file_type().is_file() && has_extension(path, &ext) {
            tracks.push(Track::from_path(path));
        }
    }

    tracing::debug!(dir = %dir.display(), count = tracks.len(), "scanned music directory");
    tracks
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn mp3() -> LibrarySettings {
        LibrarySettings {
            extension: "mp3".to_string(),
            ..LibrarySettings::default()
        }
    }

    #[test]
    fn walk_errors_tell_the_directory_from_its_entries() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("gone");
        let err = WalkDir::new(&missing)
            .min_depth(1)
            .into_iter()
            .find_map(Result::err)
            .unwrap();
        assert!(lists_root(&err));

        #[cfg(unix)]
        {
            std::os::unix::fs::symlink(&missing, dir.path().join("dangling.mp3")).unwrap();
            let err = WalkDir::new(dir.path())
                .min_depth(1)
                .max_depth(1)
                .follow_links(true)
                .into_iter()
                .find_map(Result::err)
                .unwrap();
            assert!(!lists_root(&err));
            assert_eq!(err.path(), Some(dir.path().join("dangling.mp3").as_path()));
        }
    }

    #[cfg(unix)]
    #[test]
    fn scan_skips_dangling_links_and_keeps_the_rest() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("real.mp3"), b"x").unwrap();
        std::os::unix::fs::symlink(dir.path().join("nowhere.mp3"), dir.path().join("dangling.mp3"))
            .unwrap();

        let tracks = scan(dir.path(), &mp3());
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].file_name, "real.mp3");
    }

    #[test]
    fn has_extension_is_case_insensitive() {
        assert!(has_extension(Path::new("/tmp/a.mp3"), "mp3"));
        assert!(has_extension(Path::new("/tmp/a.MP3"), "mp3"));
        assert!(!has_extension(Path::new("/tmp/a.mp3.txt"), "mp3"));
        assert!(!has_extension(Path::new("/tmp/mp3"), "mp3"));
        assert!(!has_extension(Path::new("/tmp/a"), "mp3"));
    }

    #[test]
    fn wanted_extension_strips_dot_and_case() {
        let settings = LibrarySettings {
            extension: " .MP3 ".to_string(),
            ..LibrarySettings::default()
        };
        assert_eq!(wanted_extension(&settings), "mp3");
    }

    #[test]
    fn scan_returns_only_matching_files() {
        let dir = tempdir().unwrap();

        fs::write(dir.path().join("b.MP3"), b"not a real mp3").unwrap();
        fs::write(dir.path().join("a.mp3"), b"not a real mp3").unwrap();
        fs::write(dir.path().join("c.ogg"), b"ignore me").unwrap();
        fs::write(dir.path().join("notes.txt"), b"ignore me").unwrap();

        let mut names: Vec<String> = scan(dir.path(), &mp3())
            .into_iter()
            .map(|t| t.file_name)
            .collect();
        names.sort();
        assert_eq!(names, vec!["a.mp3".to_string(), "b.MP3".to_string()]);
    }

    #[test]
    fn scan_joins_directory_and_file_name() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("song.mp3"), b"x").unwrap();

        let tracks = scan(dir.path(), &mp3());
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].path, dir.path().join("song.mp3"));
        assert_eq!(tracks[0].file_name, "song.mp3");
    }

    #[test]
    fn scan_skips_directories_named_like_tracks() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("album.mp3")).unwrap();
        fs::write(dir.path().join("album.mp3").join("inner.mp3"), b"x").unwrap();

        assert!(scan(dir.path(), &mp3()).is_empty());
    }

    #[test]
    fn scan_does_not_recurse() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("root.mp3"), b"x").unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("child.mp3"), b"x").unwrap();

        let tracks = scan(dir.path(), &mp3());
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].file_name, "root.mp3");
    }
}
