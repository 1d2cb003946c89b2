//! Discovery of content files the summary never links to.
//!
//! Markdown files nested in subdirectories below the summary that no summary
//! link references are listed under a trailing `## Hidden Pages` part so
//! they still get built. Links are read relative to the summary's directory.

use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::link::{resolve_link, slash_path};

static LINK_TARGET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\]\(\s*<?([^)\s>]+)>?[^)]*\)").unwrap());

/// Heading of the appended part.
pub const HIDDEN_PAGES_TITLE: &str = "Hidden Pages";

/// Every link target in `text`, resolved against `base_dir` into a
/// book-relative path.
pub fn referenced_paths(text: &str, base_dir: &Path) -> HashSet<String> {
    LINK_TARGET
        .captures_iter(text)
        .filter_map(|caps| resolve_link(base_dir, &caps[1]))
        .collect()
}

/// Files from `scanned` nested below `base_dir` that `text` never links to.
///
/// `text` is the summary and `base_dir` its directory. Only files at least
/// one subdirectory below `base_dir` qualify, and `excluded` paths never do.
/// Entries are relative to `base_dir`, in `scanned` order.
pub fn discover_hidden_pages<P: AsRef<Path>>(
    text: &str,
    base_dir: &Path,
    scanned: &[P],
    excluded: &[&Path],
) -> Vec<String> {
    let referenced = referenced_paths(text, base_dir);
    let excluded: HashSet<String> = excluded.iter().map(|path| slash_path(path)).collect();
    let base = slash_path(base_dir);

    scanned
        .iter()
        .map(|path| slash_path(path.as_ref()))
        .filter(|path| !excluded.contains(path) && !referenced.contains(path))
        .filter_map(|path| {
            let relative = if base.is_empty() {
                path
            } else {
                path.strip_prefix(&base)?.strip_prefix('/')?.to_owned()
            };
            relative.contains('/').then_some(relative)
        })
        .collect()
}

/// Append a hidden pages part listing `pages` to summary text.
///
/// Returns `text` unchanged when there is nothing to append.
pub fn append_hidden_pages(text: &str, pages: &[String]) -> String {
    if pages.is_empty() {
        return text.to_owned();
    }

    let mut out = String::with_capacity(text.len() + pages.len() * 32);
    out.push_str(text);
    out.push_str("\n\n## ");
    out.push_str(HIDDEN_PAGES_TITLE);
    out.push_str("\n\n");
    for page in pages {
        out.push_str(&format!("* [{page}]({page})\n"));
    }
    out
}
