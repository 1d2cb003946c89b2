//! Error types for structure resolution and book loading.

use std::path::PathBuf;

use quire_storage::StorageError;

use crate::parser::ParseError;

/// Error returned when resolving structural files or loading a book.
#[derive(Debug, thiserror::Error)]
pub enum BookError {
    /// The structural file exists but no parser handles its format.
    #[error("File is not parsable: {}", .filename.display())]
    FileNotParsable {
        /// Path of the offending file.
        filename: PathBuf,
    },

    /// Reading a structural file or an include target failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A structure kind name that isn't one of readme/glossary/summary/langs.
    #[error("Parsing invalid type \"{0}\"")]
    InvalidKind(String),

    /// An include directive refers back to a file already being expanded.
    #[error("Include cycle detected at {}: {}", .path.display(), format_chain(.chain))]
    IncludeCycle {
        /// The include target that recurred.
        path: PathBuf,
        /// Files being expanded when the cycle was found, outermost first.
        chain: Vec<PathBuf>,
    },

    /// The parser rejected the content of a structural file.
    #[error("Failed to parse {}: {source}", .filename.display())]
    Parse {
        /// Path of the file being parsed.
        filename: PathBuf,
        #[source]
        source: ParseError,
    },

    /// The book has no README, so there is no first page.
    #[error("Book has no README file")]
    MissingReadme,
}

fn format_chain(chain: &[PathBuf]) -> String {
    chain
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}
