//! Markdown structure parser built on `pulldown-cmark`.
//!
//! Each structural file is read as a stream of events; only headings,
//! paragraphs, lists and links carry meaning:
//!
//! - README: first H1 is the title, first paragraph the description
//! - GLOSSARY: each H2 (or deeper) heading names a term, the paragraphs that
//!   follow describe it
//! - SUMMARY: H2 headings and `---` rules open parts, list items are
//!   articles, nested lists are child articles
//! - LANGS: every link inside a list is a language; its path must stay
//!   inside the book

use std::path::{Component, Path};

use pulldown_cmark::{Event, HeadingLevel, Options, Parser as CmarkParser, Tag, TagEnd};

use super::{
    Glossary, GlossaryEntry, Language, Languages, ParseError, Parser, Readme, Summary,
    SummaryArticle, SummaryPart,
};

/// Structure parser for `.md` / `.markdown` files.
#[derive(Clone, Copy, Debug, Default)]
pub struct MarkdownParser;

fn events(content: &str) -> CmarkParser<'_> {
    CmarkParser::new_ext(content, Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH)
}

/// Append the textual part of an inline event to `buf`.
fn push_text(buf: &mut String, event: &Event<'_>) {
    match event {
        Event::Text(text) | Event::Code(text) => buf.push_str(text),
        Event::SoftBreak | Event::HardBreak => buf.push(' '),
        _ => {}
    }
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Article being assembled while its list item is open.
#[derive(Default)]
struct ItemBuilder {
    text: String,
    link_text: String,
    reference: Option<String>,
    in_link: bool,
    /// A child list has started; later text belongs to children only.
    nested: bool,
    children: Vec<SummaryArticle>,
}

impl ItemBuilder {
    fn build(self) -> SummaryArticle {
        let title = if self.reference.is_some() {
            self.link_text
        } else {
            self.text
        };
        SummaryArticle {
            title: title.trim().to_owned(),
            reference: self.reference,
            articles: self.children,
        }
    }
}

impl Parser for MarkdownParser {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn parse_readme(&self, content: &str) -> Result<Readme, ParseError> {
        let mut title: Option<String> = None;
        let mut first_heading: Option<String> = None;
        let mut description: Option<String> = None;

        let mut heading: Option<(HeadingLevel, String)> = None;
        let mut paragraph: Option<String> = None;
        let mut container_depth = 0usize;

        for event in events(content) {
            match &event {
                Event::Start(Tag::Heading { level, .. }) => heading = Some((*level, String::new())),
                Event::End(TagEnd::Heading(_)) => {
                    if let Some((level, text)) = heading.take()
                        && let Some(text) = non_empty(&text)
                    {
                        if level == HeadingLevel::H1 && title.is_none() {
                            title = Some(text.clone());
                        }
                        first_heading.get_or_insert(text);
                    }
                }
                Event::Start(Tag::List(_) | Tag::BlockQuote(_)) => container_depth += 1,
                Event::End(TagEnd::List(_) | TagEnd::BlockQuote(_)) => {
                    container_depth = container_depth.saturating_sub(1);
                }
                Event::Start(Tag::Paragraph) if container_depth == 0 && description.is_none() => {
                    paragraph = Some(String::new());
                }
                Event::End(TagEnd::Paragraph) => {
                    if let Some(text) = paragraph.take() {
                        description = non_empty(&text);
                    }
                }
                _ => {
                    if let Some((_, text)) = heading.as_mut() {
                        push_text(text, &event);
                    } else if let Some(text) = paragraph.as_mut() {
                        push_text(text, &event);
                    }
                }
            }
        }

        let title = title
            .or(first_heading)
            .ok_or_else(|| ParseError::new("README has no title heading"))?;

        Ok(Readme { title, description })
    }

    fn parse_glossary(&self, content: &str) -> Result<Glossary, ParseError> {
        let mut entries: Vec<GlossaryEntry> = Vec::new();
        let mut heading: Option<(HeadingLevel, String)> = None;
        let mut paragraph: Option<String> = None;

        for event in events(content) {
            match &event {
                Event::Start(Tag::Heading { level, .. }) => heading = Some((*level, String::new())),
                Event::End(TagEnd::Heading(_)) => {
                    if let Some((level, text)) = heading.take()
                        && level != HeadingLevel::H1
                        && let Some(name) = non_empty(&text)
                    {
                        entries.push(GlossaryEntry {
                            name,
                            description: String::new(),
                        });
                    }
                }
                Event::Start(Tag::Paragraph) if !entries.is_empty() => {
                    paragraph = Some(String::new());
                }
                Event::End(TagEnd::Paragraph) => {
                    if let Some(text) = paragraph.take()
                        && let Some(entry) = entries.last_mut()
                        && let Some(text) = non_empty(&text)
                    {
                        if !entry.description.is_empty() {
                            entry.description.push_str("\n\n");
                        }
                        entry.description.push_str(&text);
                    }
                }
                _ => {
                    if let Some((_, text)) = heading.as_mut() {
                        push_text(text, &event);
                    } else if let Some(text) = paragraph.as_mut() {
                        push_text(text, &event);
                    }
                }
            }
        }

        Ok(Glossary { entries })
    }

    fn parse_summary(&self, content: &str) -> Result<Summary, ParseError> {
        let mut parts = vec![SummaryPart::default()];
        let mut heading: Option<(HeadingLevel, String)> = None;
        let mut lists: Vec<Vec<SummaryArticle>> = Vec::new();
        let mut items: Vec<ItemBuilder> = Vec::new();

        for event in events(content) {
            match event {
                Event::Start(Tag::Heading { level, .. }) if items.is_empty() => {
                    heading = Some((level, String::new()));
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some((level, text)) = heading.take()
                        && level != HeadingLevel::H1
                    {
                        open_part(&mut parts, non_empty(&text));
                    }
                }
                Event::Rule if items.is_empty() => open_part(&mut parts, None),
                Event::Start(Tag::List(_)) => {
                    if let Some(item) = items.last_mut() {
                        item.nested = true;
                    }
                    lists.push(Vec::new());
                }
                Event::End(TagEnd::List(_)) => {
                    let articles = lists.pop().unwrap_or_default();
                    if let Some(parent) = items.last_mut() {
                        parent.children.extend(articles);
                    } else if let Some(part) = parts.last_mut() {
                        part.articles.extend(articles);
                    }
                }
                Event::Start(Tag::Item) => items.push(ItemBuilder::default()),
                Event::End(TagEnd::Item) => {
                    if let Some(item) = items.pop()
                        && let Some(list) = lists.last_mut()
                    {
                        list.push(item.build());
                    }
                }
                Event::Start(Tag::Link { dest_url, .. }) => {
                    if let Some(item) = items.last_mut()
                        && !item.nested
                        && item.reference.is_none()
                    {
                        item.reference = Some(dest_url.to_string());
                        item.in_link = true;
                    }
                }
                Event::End(TagEnd::Link) => {
                    if let Some(item) = items.last_mut() {
                        item.in_link = false;
                    }
                }
                other => {
                    if let Some((_, text)) = heading.as_mut() {
                        push_text(text, &other);
                    } else if let Some(item) = items.last_mut()
                        && !item.nested
                    {
                        push_text(&mut item.text, &other);
                        if item.in_link {
                            push_text(&mut item.link_text, &other);
                        }
                    }
                }
            }
        }

        parts.retain(|part| part.title.is_some() || !part.articles.is_empty());
        Ok(Summary { parts })
    }

    fn parse_languages(&self, content: &str) -> Result<Languages, ParseError> {
        let mut languages = Vec::new();
        let mut list_depth = 0usize;
        let mut link: Option<(String, String)> = None;

        for event in events(content) {
            match event {
                Event::Start(Tag::List(_)) => list_depth += 1,
                Event::End(TagEnd::List(_)) => list_depth = list_depth.saturating_sub(1),
                Event::Start(Tag::Link { dest_url, .. }) if list_depth > 0 => {
                    link = Some((dest_url.to_string(), String::new()));
                }
                Event::End(TagEnd::Link) => {
                    if let Some((dest, text)) = link.take() {
                        let path = dest.trim().trim_end_matches('/').to_owned();
                        if path.is_empty() {
                            return Err(ParseError::new(format!(
                                "language \"{}\" has an empty path",
                                text.trim()
                            )));
                        }
                        if !is_book_relative(&path) {
                            return Err(ParseError::new(format!(
                                "language \"{}\" path {path:?} leaves the book",
                                text.trim()
                            )));
                        }
                        languages.push(Language {
                            title: text.trim().to_owned(),
                            path,
                        });
                    }
                }
                other => {
                    if let Some((_, text)) = link.as_mut() {
                        push_text(text, &other);
                    }
                }
            }
        }

        Ok(Languages { languages })
    }
}

/// A relative path that stays inside the book root.
fn is_book_relative(path: &str) -> bool {
    Path::new(path)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Start a new summary part, reusing the last one while it is still blank.
fn open_part(parts: &mut Vec<SummaryPart>, title: Option<String>) {
    match parts.last_mut() {
        Some(last) if last.title.is_none() && last.articles.is_empty() => last.title = title,
        _ => parts.push(SummaryPart {
            title,
            articles: Vec::new(),
        }),
    }
}
