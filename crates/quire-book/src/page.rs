//! Book pages.

use std::path::{Path, PathBuf};

/// A content file of the book.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct File {
    path: PathBuf,
}

impl File {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path relative to the book root.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A page to generate: a content file plus the title the summary gives it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    pub file: File,
    pub title: Option<String>,
}

impl Page {
    pub fn new(path: impl Into<PathBuf>, title: Option<String>) -> Self {
        Self {
            file: File::new(path),
            title,
        }
    }

    /// Source path of the page.
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}
