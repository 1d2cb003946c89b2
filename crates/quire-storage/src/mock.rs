//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::storage::{EXCLUDED_DIRS, Storage, StorageError, is_markdown};

/// In-memory storage for tests.
///
/// Files are keyed by the exact path they are added with, so absolute paths
/// (e.g. include targets under a working directory) work as keys too. Every
/// successful `read` is recorded and can be inspected with [`reads`](Self::reads).
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use quire_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_file("README.md", "# Intro")
///     .with_file("guide/start.md", "# Start");
///
/// assert_eq!(storage.read(Path::new("README.md")).unwrap(), "# Intro");
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    files: RwLock<BTreeMap<PathBuf, String>>,
    reads: RwLock<Vec<PathBuf>>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with content.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files
            .write()
            .unwrap()
            .insert(path.into(), content.into());
        self
    }

    /// Paths read so far, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn reads(&self) -> Vec<PathBuf> {
        self.reads.read().unwrap().clone()
    }
}

impl Storage for MockStorage {
    fn read(&self, path: &Path) -> Result<String, StorageError> {
        let content = self
            .files
            .read()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::not_found(path).with_backend("Mock"))?;
        self.reads.write().unwrap().push(path.to_path_buf());
        Ok(content)
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.read().unwrap().contains_key(path)
    }

    fn scan(&self) -> Result<Vec<PathBuf>, StorageError> {
        let excluded = |path: &Path| {
            path.components().any(|c| {
                let name = c.as_os_str().to_string_lossy();
                name.starts_with('.') || EXCLUDED_DIRS.contains(&&*name)
            })
        };

        // BTreeMap keys are already sorted.
        Ok(self
            .files
            .read()
            .unwrap()
            .keys()
            .filter(|p| p.is_relative() && is_markdown(p) && !excluded(p))
            .cloned()
            .collect())
    }
}
