//! Static HTML generator.

use std::fmt::Write;

use crate::error::GenerateError;
use crate::generator::PageHandler;
use crate::output::{Output, ResultPage, output_path_for};

/// Writes each page as a standalone HTML document.
#[derive(Clone, Debug)]
pub struct HtmlGenerator {
    book_title: String,
    author: Option<String>,
}

impl HtmlGenerator {
    pub fn new(book_title: impl Into<String>) -> Self {
        Self {
            book_title: book_title.into(),
            author: None,
        }
    }

    /// Credit `author` in every document's `<meta name="author">`.
    #[must_use]
    pub fn with_author(mut self, author: Option<String>) -> Self {
        self.author = author;
        self
    }

    fn document(&self, page: &ResultPage) -> String {
        let title = match &page.title {
            Some(title) if *title != self.book_title => format!("{title} - {}", self.book_title),
            _ => self.book_title.clone(),
        };

        let mut html = String::with_capacity(page.html.len() + 256);
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("<meta charset=\"utf-8\">\n");
        html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
        if let Some(author) = &self.author {
            let _ = writeln!(html, "<meta name=\"author\" content=\"{}\">", escape(author));
        }
        let _ = writeln!(html, "<title>{}</title>", escape(&title));
        html.push_str("</head>\n<body>\n<main>\n");
        html.push_str(&page.html);
        html.push_str("</main>\n</body>\n</html>\n");
        html
    }
}

impl PageHandler for HtmlGenerator {
    fn name(&self) -> &'static str {
        "html"
    }

    fn on_page(&self, output: Output, page: ResultPage) -> Result<Output, GenerateError> {
        let rel = output_path_for(&page.path, "html");
        let written = output.write_artifact(&rel, &self.document(&page))?;
        Ok(output.with_emitted(written))
    }
}

fn escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
