//! File access for the content pipeline

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Where post and about-page text comes from
pub trait ContentSource: Send + Sync {
    /// List files directly inside `dir` with the given extension, sorted by path
    fn list_files(&self, dir: &Path, extension: &str) -> io::Result<Vec<PathBuf>>;

    /// Read a whole file as UTF-8
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// Reads straight from the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl ContentSource for FsSource {
    fn list_files(&self, dir: &Path, extension: &str) -> io::Result<Vec<PathBuf>> {
        // Surfaces NotFound / PermissionDenied for the directory itself
        fs::read_dir(dir)?;

        let mut files = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
            // A broken entry only costs that entry, not the scan
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry in {:?}: {}", dir, e);
                    continue;
                }
            };
            let path = entry.path();
            if path.is_file() && has_extension(path, extension) {
                files.push(path.to_path_buf());
            }
        }

        files.sort();
        Ok(files)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }
}

/// Check a file's extension, ignoring a leading `.` or `*.` in `extension`
pub fn has_extension(path: &Path, extension: &str) -> bool {
    let wanted = extension.trim_start_matches('*').trim_start_matches('.');
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == wanted)
        .unwrap_or(false)
}
