//! Markdown page rendering.

use std::path::Path;

use pulldown_cmark::{CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};
use quire_book::Page;
use quire_storage::Storage;

use crate::error::GenerateError;
use crate::output::{ResultPage, output_path_for};

/// Renders page sources to HTML.
#[derive(Clone, Debug)]
pub struct PageRenderer {
    gfm: bool,
    rewrite_links: bool,
}

impl Default for PageRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PageRenderer {
    /// Create a renderer with GFM enabled and link rewriting off.
    #[must_use]
    pub fn new() -> Self {
        Self {
            gfm: true,
            rewrite_links: false,
        }
    }

    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Rewrite relative links to markdown pages so they point at `.html`
    /// output files.
    #[must_use]
    pub fn with_link_rewrite(mut self, enabled: bool) -> Self {
        self.rewrite_links = enabled;
        self
    }

    fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }

    /// Read `page` from `storage` and render it.
    ///
    /// The title is the first H1 of the page, else the title the summary
    /// gives it.
    pub fn render(&self, storage: &dyn Storage, page: &Page) -> Result<ResultPage, GenerateError> {
        let markdown = storage.read(page.path())?;
        let (html, heading) = self.render_markdown(&markdown);

        Ok(ResultPage {
            path: page.path().to_path_buf(),
            title: heading.or_else(|| page.title.clone()),
            html,
        })
    }

    /// Render markdown text, returning the HTML and the first H1 text.
    pub fn render_markdown(&self, markdown: &str) -> (String, Option<String>) {
        let mut title: Option<String> = None;
        let mut in_title = false;
        let mut title_text = String::new();

        let events = Parser::new_ext(markdown, self.parser_options()).map(|event| {
            match &event {
                Event::Start(Tag::Heading {
                    level: HeadingLevel::H1,
                    ..
                }) if title.is_none() => in_title = true,
                Event::End(TagEnd::Heading(HeadingLevel::H1)) if in_title => {
                    in_title = false;
                    let text = title_text.trim();
                    if !text.is_empty() {
                        title = Some(text.to_owned());
                    }
                }
                Event::Text(text) | Event::Code(text) if in_title => title_text.push_str(text),
                _ => {}
            }

            match event {
                Event::Start(Tag::Link {
                    link_type,
                    dest_url,
                    title,
                    id,
                }) if self.rewrite_links => Event::Start(Tag::Link {
                    link_type,
                    dest_url: rewrite_link(dest_url),
                    title,
                    id,
                }),
                other => other,
            }
        });

        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, events);
        (out, title)
    }
}

/// Point a relative markdown link at its HTML output.
fn rewrite_link(dest: CowStr<'_>) -> CowStr<'_> {
    let external = dest.contains("://") || dest.starts_with("mailto:");
    if external || dest.starts_with('#') || dest.starts_with('/') {
        return dest;
    }

    let (path, anchor) = match dest.split_once('#') {
        Some((path, anchor)) => (path, Some(anchor)),
        None => (&*dest, None),
    };

    if !quire_storage::is_markdown(Path::new(path)) {
        return dest;
    }

    let mut rewritten = output_path_for(Path::new(path), "html")
        .to_string_lossy()
        .into_owned();
    if let Some(anchor) = anchor {
        rewritten.push('#');
        rewritten.push_str(anchor);
    }
    CowStr::from(rewritten)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use quire_storage::{MockStorage, StorageErrorKind};

    use super::*;

    #[test]
    fn test_render_extracts_title() {
        let storage = MockStorage::new().with_file("guide/setup.md", "# Setup\n\nInstall it.\n");
        let page = Page::new("guide/setup.md", Some("From summary".to_owned()));

        let result = PageRenderer::new().render(&storage, &page).unwrap();
        assert_eq!(result.path, Path::new("guide/setup.md"));
        assert_eq!(result.title.as_deref(), Some("Setup"));
        assert_eq!(result.html, "<h1>Setup</h1>\n<p>Install it.</p>\n");
    }

    #[test]
    fn test_render_falls_back_to_summary_title() {
        let storage = MockStorage::new().with_file("notes.md", "Just notes.\n");
        let page = Page::new("notes.md", Some("Notes".to_owned()));

        let result = PageRenderer::new().render(&storage, &page).unwrap();
        assert_eq!(result.title.as_deref(), Some("Notes"));
    }

    #[test]
    fn test_render_missing_page() {
        let storage = MockStorage::new();
        let page = Page::new("gone.md", None);

        let err = PageRenderer::new().render(&storage, &page).unwrap_err();
        assert!(matches!(err, GenerateError::Storage(ref e) if e.kind == StorageErrorKind::NotFound));
    }

    #[test]
    fn test_gfm_tables() {
        let markdown = "| a | b |\n|---|---|\n| 1 | 2 |\n";

        let (with_gfm, _) = PageRenderer::new().render_markdown(markdown);
        let (without_gfm, _) = PageRenderer::new().with_gfm(false).render_markdown(markdown);
        assert!(with_gfm.contains("<table>"));
        assert!(!without_gfm.contains("<table>"));
    }

    #[test]
    fn test_link_rewrite() {
        let markdown = "[a](guide/setup.md#install) [b](README.md) [c](https://example.com/x.md) [d](image.png) [e](#top)";
        let (html, _) = PageRenderer::new().with_link_rewrite(true).render_markdown(markdown);

        assert!(html.contains(r#"href="guide/setup.html#install""#));
        assert!(html.contains(r#"href="index.html""#));
        assert!(html.contains(r#"href="https://example.com/x.md""#));
        assert!(html.contains(r#"href="image.png""#));
        assert!(html.contains(r##"href="#top""##));
    }

    #[test]
    fn test_links_untouched_by_default() {
        let (html, _) = PageRenderer::new().render_markdown("[a](setup.md)");
        assert!(html.contains(r#"href="setup.md""#));
    }
}
