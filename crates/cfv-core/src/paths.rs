//! Path kind checks for the artifact root and its files.
//!
//! All checks use [`std::fs::symlink_metadata`], so symbolic links are never
//! followed: a link to a directory is not a directory, and a link to a file
//! is not a file.

use std::fs::Metadata;
use std::path::{Path, PathBuf};

use crate::error::{ArtifactError, ArtifactResult};

fn lstat(path: &Path) -> Option<Metadata> {
    std::fs::symlink_metadata(path).ok()
}

/// Require `dir` to exist and be a plain directory.
pub fn ensure_directory(dir: &Path) -> ArtifactResult<()> {
    match lstat(dir) {
        Some(meta) if meta.is_dir() => Ok(()),
        _ => Err(ArtifactError::NotADirectory {
            path: dir.to_path_buf(),
        }),
    }
}

/// Require `dir/file` to exist and be a plain file. Returns the joined path.
pub fn ensure_file(dir: &Path, file: &str) -> ArtifactResult<PathBuf> {
    let path = dir.join(file);
    if is_regular_file(&path) {
        Ok(path)
    } else {
        Err(ArtifactError::MissingFile {
            file: file.to_string(),
            dir: dir.to_path_buf(),
        })
    }
}

/// Whether `path` exists and is a plain file.
pub fn is_regular_file(path: &Path) -> bool {
    lstat(path).is_some_and(|meta| meta.is_file())
}
