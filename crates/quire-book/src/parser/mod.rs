//! Structure parsers and the data they produce.
//!
//! A [`Parser`] turns the text of a structural file into one of the typed
//! models below. [`MarkdownParser`] is the only implementation; other formats
//! have no parser and are rejected at resolution time.

mod markdown;

use std::path::Path;

pub use markdown::MarkdownParser;

/// Error produced by a [`Parser`].
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    message: String,
}

impl ParseError {
    /// Create a parse error with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Parses structural file content into typed models.
pub trait Parser: Send + Sync {
    /// Short format name used in logs (e.g. "markdown").
    fn name(&self) -> &'static str;

    /// Parse a README into the book introduction.
    fn parse_readme(&self, content: &str) -> Result<Readme, ParseError>;

    /// Parse a GLOSSARY into an ordered list of entries.
    fn parse_glossary(&self, content: &str) -> Result<Glossary, ParseError>;

    /// Parse a SUMMARY into parts and nested articles.
    fn parse_summary(&self, content: &str) -> Result<Summary, ParseError>;

    /// Parse a LANGS file into the list of languages.
    fn parse_languages(&self, content: &str) -> Result<Languages, ParseError>;
}

/// Pick a parser from a structural file's extension.
///
/// Returns `None` for formats no parser understands.
pub fn parser_for_path(path: &Path) -> Option<Box<dyn Parser>> {
    if quire_storage::is_markdown(path) {
        Some(Box::new(MarkdownParser))
    } else {
        None
    }
}

/// Parsed content of any structural file.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", content = "value", rename_all = "lowercase"))]
pub enum Structure {
    Readme(Readme),
    Glossary(Glossary),
    Summary(Summary),
    Languages(Languages),
}

impl Structure {
    pub fn into_readme(self) -> Option<Readme> {
        match self {
            Self::Readme(readme) => Some(readme),
            _ => None,
        }
    }

    pub fn into_glossary(self) -> Option<Glossary> {
        match self {
            Self::Glossary(glossary) => Some(glossary),
            _ => None,
        }
    }

    pub fn into_summary(self) -> Option<Summary> {
        match self {
            Self::Summary(summary) => Some(summary),
            _ => None,
        }
    }

    pub fn into_languages(self) -> Option<Languages> {
        match self {
            Self::Languages(languages) => Some(languages),
            _ => None,
        }
    }
}

/// Book introduction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Readme {
    /// Text of the first H1 heading.
    pub title: String,
    /// Text of the first paragraph.
    pub description: Option<String>,
}

/// Ordered glossary.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Glossary {
    pub entries: Vec<GlossaryEntry>,
}

/// One glossary term.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GlossaryEntry {
    pub name: String,
    pub description: String,
}

/// Table of contents.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Summary {
    pub parts: Vec<SummaryPart>,
}

impl Summary {
    /// Every article reference, depth-first in document order.
    pub fn references(&self) -> Vec<&str> {
        fn walk<'a>(articles: &'a [SummaryArticle], out: &mut Vec<&'a str>) {
            for article in articles {
                if let Some(reference) = &article.reference {
                    out.push(reference);
                }
                walk(&article.articles, out);
            }
        }

        let mut out = Vec::new();
        for part in &self.parts {
            walk(&part.articles, &mut out);
        }
        out
    }
}

/// A titled (or untitled leading) group of articles.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SummaryPart {
    pub title: Option<String>,
    pub articles: Vec<SummaryArticle>,
}

/// A table-of-contents entry, possibly with children.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SummaryArticle {
    pub title: String,
    /// Link target; `None` for a title-only entry.
    pub reference: Option<String>,
    pub articles: Vec<SummaryArticle>,
}

/// Language index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Languages {
    pub languages: Vec<Language>,
}

impl Languages {
    /// Whether the book is an index of per-language books.
    pub fn is_multilingual(&self) -> bool {
        !self.languages.is_empty()
    }
}

/// One language of a multilingual book.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Language {
    pub title: String,
    /// Subdirectory holding the language's book, without trailing `/`.
    pub path: String,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn article(title: &str, reference: Option<&str>, articles: Vec<SummaryArticle>) -> SummaryArticle {
        SummaryArticle {
            title: title.to_owned(),
            reference: reference.map(str::to_owned),
            articles,
        }
    }

    fn sample_summary() -> Summary {
        Summary {
            parts: vec![
                SummaryPart {
                    title: None,
                    articles: vec![article(
                        "Basics",
                        Some("basics/README.md"),
                        vec![
                            article("Install", Some("basics/install.md"), vec![]),
                            article("Later", None, vec![]),
                        ],
                    )],
                },
                SummaryPart {
                    title: Some("Reference".to_owned()),
                    articles: vec![article("API", Some("reference/api.md"), vec![])],
                },
            ],
        }
    }

    #[test]
    fn test_summary_references_depth_first() {
        assert_eq!(
            sample_summary().references(),
            vec!["basics/README.md", "basics/install.md", "reference/api.md"]
        );
    }

    #[test]
    fn test_languages_is_multilingual() {
        let english = Language {
            title: "English".to_owned(),
            path: "en".to_owned(),
        };

        assert!(!Languages::default().is_multilingual());
        assert!(Languages { languages: vec![english] }.is_multilingual());
    }

    #[test]
    fn test_parser_for_path() {
        assert_eq!(
            parser_for_path(Path::new("SUMMARY.md")).map(|p| p.name()),
            Some("markdown")
        );
        assert!(parser_for_path(Path::new("SUMMARY.adoc")).is_none());
    }

    #[test]
    fn test_structure_accessors() {
        let structure = Structure::Summary(Summary::default());
        assert!(structure.clone().into_readme().is_none());
        assert_eq!(structure.into_summary(), Some(Summary::default()));
    }
}
