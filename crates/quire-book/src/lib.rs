//! Book structure resolution for Quire.
//!
//! A book is described by up to four structural files: `README.md`,
//! `SUMMARY.md`, `GLOSSARY.md` and `LANGS.md`. This crate locates them,
//! prepares their text and parses them into typed models.
//!
//! # Summary preparation
//!
//! Before the summary is parsed:
//!
//! - `{% include path %}` markers are replaced by the target's text,
//!   recursively, with include cycles reported as errors
//! - markdown files nested in subdirectories below the summary that no
//!   summary link points to are appended under a `## Hidden Pages` heading
//!
//! Summary links are read relative to the summary's own directory.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use quire_book::{Book, ResolveOptions, StructureKind, resolve_structure};
//! use quire_storage::FsStorage;
//!
//! let book = Book::new(Arc::new(FsStorage::new("docs".into())));
//! let options = ResolveOptions::new(std::env::current_dir()?);
//! if let Some((file, structure)) = resolve_structure(&book, StructureKind::Summary, &options)? {
//!     println!("{}: {structure:?}", file.path().display());
//! }
//! ```

mod book;
mod error;
mod file;
mod hidden;
mod include;
mod kind;
mod link;
mod loader;
mod page;
pub mod parser;
mod resolve;

pub use book::{Book, StructureFiles};
pub use error::BookError;
pub use file::StructuralFile;
pub use hidden::{HIDDEN_PAGES_TITLE, append_hidden_pages, discover_hidden_pages, referenced_paths};
pub use include::{Expansion, expand_includes};
pub use kind::StructureKind;
pub use loader::{LoadedBook, load_book, load_languages};
pub use page::{File, Page};
pub use parser::{MarkdownParser, ParseError, Parser, Structure};
pub use resolve::{ResolveOptions, resolve_structure};
