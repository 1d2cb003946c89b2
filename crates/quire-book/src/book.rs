//! Book handle: content storage plus structural file lookup.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use quire_storage::Storage;

use crate::file::StructuralFile;
use crate::kind::StructureKind;
use crate::parser::parser_for_path;

/// Extensions tried when a configured structural file name has none.
const STRUCTURE_EXTENSIONS: [&str; 2] = ["md", "markdown"];

/// Names of the structural files, relative to the book root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructureFiles {
    pub readme: PathBuf,
    pub summary: PathBuf,
    pub glossary: PathBuf,
    pub langs: PathBuf,
}

impl Default for StructureFiles {
    fn default() -> Self {
        Self {
            readme: PathBuf::from("README.md"),
            summary: PathBuf::from("SUMMARY.md"),
            glossary: PathBuf::from("GLOSSARY.md"),
            langs: PathBuf::from("LANGS.md"),
        }
    }
}

impl StructureFiles {
    /// Configured name for `kind`.
    pub fn path(&self, kind: StructureKind) -> &Path {
        match kind {
            StructureKind::Readme => &self.readme,
            StructureKind::Glossary => &self.glossary,
            StructureKind::Summary => &self.summary,
            StructureKind::Langs => &self.langs,
        }
    }
}

/// Read-only view of a book's sources.
///
/// Cloning is cheap; the storage is shared.
#[derive(Clone)]
pub struct Book {
    storage: Arc<dyn Storage>,
    files: StructureFiles,
}

impl Book {
    /// Create a book over `storage` with the default structural file names.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            files: StructureFiles::default(),
        }
    }

    #[must_use]
    pub fn with_structure_files(mut self, files: StructureFiles) -> Self {
        self.files = files;
        self
    }

    /// Storage the book's content is read from.
    pub fn content_fs(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    /// Shared handle to the content storage.
    pub fn storage(&self) -> Arc<dyn Storage> {
        Arc::clone(&self.storage)
    }

    pub fn structure_files(&self) -> &StructureFiles {
        &self.files
    }

    /// Locate the structural file for `kind`.
    ///
    /// A configured name without extension is tried with each markdown
    /// extension. Returns `None` when no candidate exists; the parser of the
    /// returned file is `None` when its format isn't supported.
    pub fn lookup_structure_file(&self, kind: StructureKind) -> Option<StructuralFile> {
        let configured = self.files.path(kind);

        let path = if configured.extension().is_some() {
            self.storage
                .exists(configured)
                .then(|| configured.to_path_buf())
        } else {
            STRUCTURE_EXTENSIONS
                .iter()
                .map(|ext| configured.with_extension(ext))
                .find(|candidate| self.storage.exists(candidate))
        }?;

        let parser = parser_for_path(&path);
        tracing::debug!(
            kind = %kind,
            path = %path.display(),
            parser = parser.as_ref().map_or("none", |p| p.name()),
            "Found structural file"
        );
        Some(StructuralFile::new(kind, path, parser))
    }
}

impl std::fmt::Debug for Book {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Book").field("files", &self.files).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use quire_storage::MockStorage;

    use super::*;

    #[test]
    fn test_lookup_existing() {
        let book = Book::new(Arc::new(MockStorage::new().with_file("SUMMARY.md", "")));

        let file = book.lookup_structure_file(StructureKind::Summary).unwrap();
        assert_eq!(file.kind(), StructureKind::Summary);
        assert_eq!(file.path(), Path::new("SUMMARY.md"));
        assert_eq!(file.parser().map(|p| p.name()), Some("markdown"));
    }

    #[test]
    fn test_lookup_missing() {
        let book = Book::new(Arc::new(MockStorage::new()));

        assert!(book.lookup_structure_file(StructureKind::Glossary).is_none());
    }

    #[test]
    fn test_lookup_unsupported_format_has_no_parser() {
        let storage = MockStorage::new().with_file("SUMMARY.adoc", "");
        let book = Book::new(Arc::new(storage)).with_structure_files(StructureFiles {
            summary: PathBuf::from("SUMMARY.adoc"),
            ..StructureFiles::default()
        });

        let file = book.lookup_structure_file(StructureKind::Summary).unwrap();
        assert!(file.parser().is_none());
    }

    #[test]
    fn test_lookup_without_extension() {
        let storage = MockStorage::new().with_file("docs/TOC.markdown", "");
        let book = Book::new(Arc::new(storage)).with_structure_files(StructureFiles {
            summary: PathBuf::from("docs/TOC"),
            ..StructureFiles::default()
        });

        let file = book.lookup_structure_file(StructureKind::Summary).unwrap();
        assert_eq!(file.path(), Path::new("docs/TOC.markdown"));
    }
}
