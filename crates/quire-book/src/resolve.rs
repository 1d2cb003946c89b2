//! Structural file resolution.
//!
//! [`resolve_structure`] locates a structural file, prepares its text and
//! parses it:
//!
//! 1. Look the file up through the [`Book`]; a missing file is `Ok(None)`
//! 2. Fail with [`BookError::FileNotParsable`] when no parser handles it
//! 3. Read it through the content storage
//! 4. For the summary only: expand includes, then append unreferenced
//!    content files nested below the summary's directory as hidden pages
//! 5. Dispatch to the parser method for the kind

use std::path::{Path, PathBuf};

use crate::book::Book;
use crate::error::BookError;
use crate::file::StructuralFile;
use crate::hidden::{append_hidden_pages, discover_hidden_pages};
use crate::include::expand_includes;
use crate::kind::StructureKind;
use crate::parser::{ParseError, Parser, Structure};

/// Caller-supplied resolution settings.
#[derive(Clone, Debug, Default)]
pub struct ResolveOptions {
    /// Path read instead of the looked-up file's own path.
    pub summary: Option<PathBuf>,
    /// Directory include targets are resolved against.
    pub working_dir: PathBuf,
}

impl ResolveOptions {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            summary: None,
            working_dir: working_dir.into(),
        }
    }

    #[must_use]
    pub fn with_summary(mut self, summary: Option<PathBuf>) -> Self {
        self.summary = summary;
        self
    }
}

/// Resolve and parse the structural file of `kind`.
///
/// Returns the file handle with its parsed content, or `None` when the book
/// has no such file.
pub fn resolve_structure(
    book: &Book,
    kind: StructureKind,
    options: &ResolveOptions,
) -> Result<Option<(StructuralFile, Structure)>, BookError> {
    let Some(file) = book.lookup_structure_file(kind) else {
        tracing::debug!(kind = %kind, "No structural file");
        return Ok(None);
    };

    let path = options.summary.as_deref().unwrap_or(file.path());

    let Some(parser) = file.parser() else {
        return Err(BookError::FileNotParsable {
            filename: path.to_path_buf(),
        });
    };

    let content = book.content_fs().read(path)?;
    let content = prepare_content(book, kind, path, content, &options.working_dir)?;
    let structure = parse_content(parser, kind, &content).map_err(|source| BookError::Parse {
        filename: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(kind = %kind, path = %path.display(), parser = parser.name(), "Resolved structural file");
    Ok(Some((file, structure)))
}

/// Kind-specific preprocessing. Only the summary is rewritten.
fn prepare_content(
    book: &Book,
    kind: StructureKind,
    path: &Path,
    content: String,
    working_dir: &Path,
) -> Result<String, BookError> {
    if kind != StructureKind::Summary {
        return Ok(content);
    }

    let expansion = expand_includes(book.content_fs(), &content, path, working_dir)?;
    if expansion.substitutions > 0 {
        tracing::debug!(
            path = %path.display(),
            substitutions = expansion.substitutions,
            "Expanded summary includes"
        );
    }

    let base_dir = path.parent().unwrap_or(Path::new(""));
    let structural_files = structural_paths(book, path);
    let structural: Vec<&Path> = structural_files.iter().map(PathBuf::as_path).collect();

    let scanned = book.content_fs().scan()?;
    let hidden = discover_hidden_pages(&expansion.text, base_dir, &scanned, &structural);
    if !hidden.is_empty() {
        tracing::debug!(count = hidden.len(), "Appending hidden pages to summary");
    }

    Ok(append_hidden_pages(&expansion.text, &hidden))
}

/// Configured and looked-up paths of every structural file, plus `summary`.
fn structural_paths(book: &Book, summary: &Path) -> Vec<PathBuf> {
    let files = book.structure_files();
    let mut paths: Vec<PathBuf> = StructureKind::ALL
        .into_iter()
        .map(|kind| files.path(kind).to_path_buf())
        .collect();
    paths.extend(
        StructureKind::ALL
            .into_iter()
            .filter_map(|kind| book.lookup_structure_file(kind))
            .map(|file| file.path().to_path_buf()),
    );
    paths.push(summary.to_path_buf());
    paths
}

fn parse_content(
    parser: &dyn Parser,
    kind: StructureKind,
    content: &str,
) -> Result<Structure, ParseError> {
    Ok(match kind {
        StructureKind::Readme => Structure::Readme(parser.parse_readme(content)?),
        StructureKind::Glossary => Structure::Glossary(parser.parse_glossary(content)?),
        StructureKind::Summary => Structure::Summary(parser.parse_summary(content)?),
        StructureKind::Langs => Structure::Languages(parser.parse_languages(content)?),
    })
}
