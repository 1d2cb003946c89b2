//! Book loading: resolves every structural file and builds the page list.

use std::collections::HashSet;
use std::path::Path;

use crate::book::Book;
use crate::error::BookError;
use crate::kind::StructureKind;
use crate::link::{resolve_link, slash_path};
use crate::page::Page;
use crate::parser::{Glossary, Languages, Readme, Summary, SummaryArticle};
use crate::resolve::{ResolveOptions, resolve_structure};

/// Everything known about a book after its structural files are parsed.
#[derive(Clone, Debug)]
pub struct LoadedBook {
    pub readme: Readme,
    pub summary: Option<Summary>,
    pub glossary: Option<Glossary>,
    pub languages: Option<Languages>,
    pages: Vec<Page>,
}

impl LoadedBook {
    /// Pages in generation order: README first, then summary order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn into_pages(self) -> Vec<Page> {
        self.pages
    }
}

/// Resolve only the LANGS file.
pub fn load_languages(book: &Book, options: &ResolveOptions) -> Result<Option<Languages>, BookError> {
    let options = without_summary(options);
    Ok(resolve_structure(book, StructureKind::Langs, &options)?
        .and_then(|(_, structure)| structure.into_languages()))
}

/// Resolve all structural files of `book` and build its page list.
///
/// The summary override in `options` applies to the summary only.
pub fn load_book(book: &Book, options: &ResolveOptions) -> Result<LoadedBook, BookError> {
    let plain = without_summary(options);

    let languages = load_languages(book, &plain)?;

    let (readme_file, readme) = resolve_structure(book, StructureKind::Readme, &plain)?
        .and_then(|(file, structure)| structure.into_readme().map(|readme| (file, readme)))
        .ok_or(BookError::MissingReadme)?;

    let summary = resolve_structure(book, StructureKind::Summary, options)?.and_then(|(file, structure)| {
        let path = options.summary.as_deref().unwrap_or(file.path());
        let dir = path.parent().unwrap_or(Path::new("")).to_path_buf();
        structure.into_summary().map(|summary| (dir, summary))
    });

    let glossary = resolve_structure(book, StructureKind::Glossary, &plain)?
        .and_then(|(_, structure)| structure.into_glossary());

    let pages = build_pages(
        readme_file.path(),
        &readme,
        summary.as_ref().map(|(dir, summary)| (dir.as_path(), summary)),
    );
    tracing::info!(pages = pages.len(), title = %readme.title, "Loaded book");

    Ok(LoadedBook {
        readme,
        summary: summary.map(|(_, summary)| summary),
        glossary,
        languages,
        pages,
    })
}

fn without_summary(options: &ResolveOptions) -> ResolveOptions {
    ResolveOptions {
        summary: None,
        working_dir: options.working_dir.clone(),
    }
}

/// Book-relative page path for a reference in a summary under `base_dir`,
/// if it names a local markdown file.
fn page_path(base_dir: &Path, reference: &str) -> Option<String> {
    resolve_link(base_dir, reference).filter(|path| quire_storage::is_markdown(Path::new(path)))
}

/// Pages in order. Summary references resolve against the summary's
/// directory.
fn build_pages(readme_path: &Path, readme: &Readme, summary: Option<(&Path, &Summary)>) -> Vec<Page> {
    fn walk(
        base_dir: &Path,
        articles: &[SummaryArticle],
        seen: &mut HashSet<String>,
        pages: &mut Vec<Page>,
    ) {
        for article in articles {
            if let Some(path) = article.reference.as_deref().and_then(|r| page_path(base_dir, r))
                && seen.insert(path.clone())
            {
                pages.push(Page::new(path, Some(article.title.clone())));
            }
            walk(base_dir, &article.articles, seen, pages);
        }
    }

    let mut seen = HashSet::from([slash_path(readme_path)]);
    let mut pages = vec![Page::new(readme_path, Some(readme.title.clone()))];

    if let Some((base_dir, summary)) = summary {
        for part in &summary.parts {
            walk(base_dir, &part.articles, &mut seen, &mut pages);
        }
    }
    pages
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use quire_storage::MockStorage;

    use super::*;
    use crate::book::StructureFiles;

    fn load(storage: MockStorage) -> Result<LoadedBook, BookError> {
        load_book(&Book::new(Arc::new(storage)), &ResolveOptions::new("/work"))
    }

    fn paths(book: &LoadedBook) -> Vec<&Path> {
        book.pages().iter().map(Page::path).collect()
    }

    #[test]
    fn test_missing_readme() {
        let err = load(MockStorage::new().with_file("SUMMARY.md", "* [A](a.md)")).unwrap_err();
        assert!(matches!(err, BookError::MissingReadme));
    }

    #[test]
    fn test_readme_only() {
        let book = load(MockStorage::new().with_file("README.md", "# Guide")).unwrap();

        assert_eq!(paths(&book), vec![Path::new("README.md")]);
        assert_eq!(book.pages()[0].title.as_deref(), Some("Guide"));
        assert!(book.summary.is_none());
        assert!(book.glossary.is_none());
        assert!(book.languages.is_none());
    }

    #[test]
    fn test_pages_follow_summary_order() {
        let storage = MockStorage::new()
            .with_file("README.md", "# Guide")
            .with_file(
                "SUMMARY.md",
                "# Summary\n\n* [Intro](README.md)\n* [Setup](./setup.md#install)\n    * [Linux](setup/linux.md)\n* [Site](https://example.com)\n* [Again](setup.md)\n* Draft\n* [Image](cover.png)\n",
            )
            .with_file("GLOSSARY.md", "## Quire\n\nLeaves.\n");

        let book = load(storage).unwrap();
        assert_eq!(
            paths(&book),
            vec![
                Path::new("README.md"),
                Path::new("setup.md"),
                Path::new("setup/linux.md"),
            ]
        );
        assert_eq!(book.pages()[1].title.as_deref(), Some("Setup"));
        assert_eq!(book.glossary.unwrap().entries.len(), 1);
    }

    #[test]
    fn test_hidden_pages_become_pages() {
        let storage = MockStorage::new()
            .with_file("README.md", "# Guide")
            .with_file("SUMMARY.md", "* [One](a/one.md)")
            .with_file("a/one.md", "# One")
            .with_file("a/two.md", "# Two");

        let book = load(storage).unwrap();
        assert_eq!(
            paths(&book),
            vec![
                Path::new("README.md"),
                Path::new("a/one.md"),
                Path::new("a/two.md"),
            ]
        );
    }

    #[test]
    fn test_summary_override_only_affects_summary() {
        let storage = MockStorage::new()
            .with_file("README.md", "# Guide")
            .with_file("SUMMARY.md", "* [Default](default.md)")
            .with_file("alt.md", "* [Alternate](alternate.md)");
        let options = ResolveOptions::new("/work").with_summary(Some(PathBuf::from("alt.md")));

        let book = load_book(&Book::new(Arc::new(storage)), &options).unwrap();
        assert_eq!(book.readme.title, "Guide");
        assert_eq!(
            paths(&book),
            vec![Path::new("README.md"), Path::new("alternate.md")]
        );
    }

    #[test]
    fn test_languages() {
        let storage = MockStorage::new()
            .with_file("LANGS.md", "* [English](en/)\n* [Deutsch](de/)\n")
            .with_file("en/README.md", "# Guide");
        let book = Book::new(Arc::new(storage));

        let languages = load_languages(&book, &ResolveOptions::new("/work"))
            .unwrap()
            .unwrap();
        assert_eq!(languages.languages.len(), 2);
    }

    #[test]
    fn test_languages_outside_book_fail() {
        let storage = MockStorage::new().with_file("LANGS.md", "* [English](en/)\n* [Escape](../x/)\n");
        let book = Book::new(Arc::new(storage));

        let err = load_languages(&book, &ResolveOptions::new("/work")).unwrap_err();
        assert!(matches!(err, BookError::Parse { ref filename, .. } if filename == Path::new("LANGS.md")));
    }

    #[test]
    fn test_page_path() {
        let root = Path::new("");
        assert_eq!(page_path(root, "a/b.md#c").as_deref(), Some("a/b.md"));
        assert_eq!(page_path(root, "./a.markdown").as_deref(), Some("a.markdown"));
        assert_eq!(page_path(root, "https://example.com/a.md"), None);
        assert_eq!(page_path(root, "mailto:team@example.com"), None);
        assert_eq!(page_path(root, "#anchor"), None);
        assert_eq!(page_path(root, "image.png"), None);
        assert_eq!(page_path(Path::new("docs"), "one.md").as_deref(), Some("docs/one.md"));
    }

    #[test]
    fn test_nested_summary_pages() {
        let storage = MockStorage::new()
            .with_file("README.md", "# Guide")
            .with_file("docs/SUMMARY.md", "* [Home](../README.md)\n* [One](one.md)")
            .with_file("docs/one.md", "# One")
            .with_file("docs/extra/two.md", "# Two");
        let book = Book::new(Arc::new(storage)).with_structure_files(StructureFiles {
            summary: PathBuf::from("docs/SUMMARY.md"),
            ..StructureFiles::default()
        });

        let book = load_book(&book, &ResolveOptions::new("/work")).unwrap();
        assert_eq!(
            paths(&book),
            vec![
                Path::new("README.md"),
                Path::new("docs/one.md"),
                Path::new("docs/extra/two.md"),
            ]
        );
    }
}
