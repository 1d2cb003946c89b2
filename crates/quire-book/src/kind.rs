//! Structural file kinds.

use std::fmt;
use std::str::FromStr;

use crate::error::BookError;

/// The four structural files a book can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StructureKind {
    /// Book introduction (`README.md`).
    Readme,
    /// Term definitions (`GLOSSARY.md`).
    Glossary,
    /// Table of contents (`SUMMARY.md`).
    Summary,
    /// Language index of a multilingual book (`LANGS.md`).
    Langs,
}

impl StructureKind {
    /// All kinds, in the order a book is loaded.
    pub const ALL: [Self; 4] = [Self::Langs, Self::Readme, Self::Summary, Self::Glossary];

    /// Name used on the command line and in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Readme => "readme",
            Self::Glossary => "glossary",
            Self::Summary => "summary",
            Self::Langs => "langs",
        }
    }
}

impl fmt::Display for StructureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StructureKind {
    type Err = BookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "readme" => Ok(Self::Readme),
            "glossary" => Ok(Self::Glossary),
            "summary" => Ok(Self::Summary),
            "langs" => Ok(Self::Langs),
            other => Err(BookError::InvalidKind(other.to_owned())),
        }
    }
}
