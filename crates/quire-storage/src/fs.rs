//! Filesystem storage implementation.
//!
//! Provides [`FsStorage`] for reading book content from a local directory.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::storage::{EXCLUDED_DIRS, Storage, StorageError, StorageErrorKind, is_markdown};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem storage rooted at a book directory.
///
/// # Example
///
/// ```ignore
/// use std::path::{Path, PathBuf};
/// use quire_storage::{FsStorage, Storage};
///
/// let storage = FsStorage::new(PathBuf::from("docs"));
/// let summary = storage.read(Path::new("SUMMARY.md"))?;
/// ```
pub struct FsStorage {
    /// Book root directory.
    root: PathBuf,
    /// Directory names skipped while scanning, at any depth.
    excluded_dirs: Vec<String>,
}

impl FsStorage {
    /// Create a storage rooted at `root` with the default exclusions.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            excluded_dirs: EXCLUDED_DIRS.iter().map(|d| (*d).to_owned()).collect(),
        }
    }

    /// Also skip directories named `name` while scanning.
    ///
    /// Used for a configured output directory that isn't `_book`.
    #[must_use]
    pub fn with_excluded_dir(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.excluded_dirs.contains(&name) {
            self.excluded_dirs.push(name);
        }
        self
    }

    /// Book root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a storage path to a filesystem path.
    ///
    /// Relative paths must stay inside the root; absolute paths are taken as-is.
    fn resolve(&self, path: &Path) -> Result<PathBuf, StorageError> {
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }

        let has_parent_dir = path.components().any(|c| matches!(c, Component::ParentDir));
        if has_parent_dir {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(path)
                .with_backend(BACKEND));
        }

        Ok(self.root.join(path))
    }

    /// Walk `dir` and collect markdown files as paths relative to the root.
    fn scan_directory(&self, dir: &Path, rel_dir: &Path, files: &mut Vec<PathBuf>) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!(path = %dir.display(), error = %e, "Skipping unreadable directory");
                return;
            }
        };

        for entry in entries.filter_map(Result::ok) {
            let name = entry.file_name();
            let name = name.to_string_lossy();

            if name.starts_with('.') {
                continue;
            }

            let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
            let rel_path = rel_dir.join(&*name);

            if is_dir {
                if self.excluded_dirs.iter().any(|d| *d == *name) {
                    continue;
                }
                self.scan_directory(&entry.path(), &rel_path, files);
            } else if is_markdown(&rel_path) {
                files.push(rel_path);
            }
        }
    }
}

impl Storage for FsStorage {
    fn read(&self, path: &Path) -> Result<String, StorageError> {
        let full_path = self.resolve(path)?;
        fs::read_to_string(&full_path)
            .map_err(|e| StorageError::io(e, path).with_backend(BACKEND))
    }

    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).is_ok_and(|p| p.is_file())
    }

    fn scan(&self) -> Result<Vec<PathBuf>, StorageError> {
        if !self.root.is_dir() {
            return Err(StorageError::not_found(&self.root).with_backend(BACKEND));
        }

        let mut files = Vec::new();
        self.scan_directory(&self.root, Path::new(""), &mut files);
        files.sort();
        tracing::debug!(file_count = files.len(), root = %self.root.display(), "Content scan completed");
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn create_book() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("README.md"), "# Book").unwrap();
        fs::write(dir.path().join("SUMMARY.md"), "# Summary").unwrap();
        fs::create_dir_all(dir.path().join("guide/advanced")).unwrap();
        fs::write(dir.path().join("guide/start.md"), "# Start").unwrap();
        fs::write(dir.path().join("guide/advanced/tuning.markdown"), "# Tuning").unwrap();
        fs::write(dir.path().join("guide/diagram.png"), [0u8, 1, 2]).unwrap();
        dir
    }

    #[test]
    fn test_read_relative() {
        let dir = create_book();
        let storage = FsStorage::new(dir.path().to_path_buf());

        assert_eq!(storage.read(Path::new("guide/start.md")).unwrap(), "# Start");
    }

    #[test]
    fn test_read_absolute() {
        let dir = create_book();
        let outside = tempfile::tempdir().unwrap();
        let shared = outside.path().join("shared.md");
        fs::write(&shared, "* [Shared](shared.md)").unwrap();

        let storage = FsStorage::new(dir.path().to_path_buf());
        assert_eq!(storage.read(&shared).unwrap(), "* [Shared](shared.md)");
    }

    #[test]
    fn test_read_missing() {
        let dir = create_book();
        let storage = FsStorage::new(dir.path().to_path_buf());

        let err = storage.read(Path::new("GLOSSARY.md")).unwrap_err();
        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.backend, Some("Fs"));
        assert_eq!(err.path.as_deref(), Some(Path::new("GLOSSARY.md")));
    }

    #[test]
    fn test_read_rejects_parent_dir() {
        let dir = create_book();
        let storage = FsStorage::new(dir.path().to_path_buf());

        let err = storage.read(Path::new("../etc/passwd")).unwrap_err();
        assert_eq!(err.kind, StorageErrorKind::InvalidPath);
    }

    #[test]
    fn test_exists() {
        let dir = create_book();
        let storage = FsStorage::new(dir.path().to_path_buf());

        assert!(storage.exists(Path::new("README.md")));
        assert!(!storage.exists(Path::new("LANGS.md")));
        assert!(!storage.exists(Path::new("guide")));
    }

    #[test]
    fn test_scan_lists_markdown_sorted() {
        let dir = create_book();
        let storage = FsStorage::new(dir.path().to_path_buf());

        let files = storage.scan().unwrap();
        assert_eq!(
            files,
            vec![
                PathBuf::from("README.md"),
                PathBuf::from("SUMMARY.md"),
                PathBuf::from("guide/advanced/tuning.markdown"),
                PathBuf::from("guide/start.md"),
            ]
        );
    }

    #[test]
    fn test_scan_skips_excluded_and_hidden() {
        let dir = create_book();
        for excluded in ["_book", "node_modules", ".git", "site"] {
            fs::create_dir_all(dir.path().join(excluded)).unwrap();
            fs::write(dir.path().join(excluded).join("page.md"), "# Generated").unwrap();
        }

        let storage = FsStorage::new(dir.path().to_path_buf()).with_excluded_dir("site");
        let files = storage.scan().unwrap();

        assert!(files.iter().all(|f| !f.starts_with("_book")));
        assert!(files.iter().all(|f| !f.starts_with("node_modules")));
        assert!(files.iter().all(|f| !f.starts_with(".git")));
        assert!(files.iter().all(|f| !f.starts_with("site")));
        assert_eq!(files.len(), 4);
    }

    #[test]
    fn test_scan_missing_root() {
        let storage = FsStorage::new(PathBuf::from("/nonexistent/book"));
        let err = storage.scan().unwrap_err();
        assert_eq!(err.kind, StorageErrorKind::NotFound);
    }
}
