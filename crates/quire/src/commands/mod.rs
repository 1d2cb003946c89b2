//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod parse;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use quire_book::{Book, StructureFiles};
use quire_config::Config;
use quire_storage::FsStorage;

pub(crate) use build::BuildArgs;
pub(crate) use parse::ParseArgs;

/// Open the book rooted at `source_dir` with the configured structure names.
///
/// The configured output directory is skipped when scanning for content.
pub(crate) fn open_book(source_dir: &Path, config: &Config) -> Book {
    let mut storage = FsStorage::new(source_dir.to_path_buf());
    if let Some(name) = config.output_dir_name() {
        storage = storage.with_excluded_dir(name);
    }

    let structure = &config.structure;
    Book::new(Arc::new(storage)).with_structure_files(StructureFiles {
        readme: PathBuf::from(&structure.readme),
        summary: PathBuf::from(&structure.summary),
        glossary: PathBuf::from(&structure.glossary),
        langs: PathBuf::from(&structure.langs),
    })
}
