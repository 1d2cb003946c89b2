//! Structural file handles.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::kind::StructureKind;
use crate::parser::Parser;

/// A structural file found in the book, with the parser for its format.
pub struct StructuralFile {
    kind: StructureKind,
    path: PathBuf,
    parser: Option<Box<dyn Parser>>,
}

impl StructuralFile {
    pub fn new(kind: StructureKind, path: PathBuf, parser: Option<Box<dyn Parser>>) -> Self {
        Self { kind, path, parser }
    }

    pub fn kind(&self) -> StructureKind {
        self.kind
    }

    /// Path relative to the book root.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parser for the file's format, `None` when the format is unsupported.
    pub fn parser(&self) -> Option<&dyn Parser> {
        self.parser.as_deref()
    }
}

impl fmt::Debug for StructuralFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructuralFile")
            .field("kind", &self.kind)
            .field("path", &self.path)
            .field("parser", &self.parser.as_ref().map(|p| p.name()))
            .finish()
    }
}
