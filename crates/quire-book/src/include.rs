//! `{% include path %}` expansion for structural files.
//!
//! Include targets are resolved against an explicit working directory and
//! read through the book's content storage. Included text is expanded in
//! turn, so the result never contains an include marker.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use quire_storage::Storage;
use regex::Regex;

use crate::error::BookError;

static INCLUDE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{%\s*include\s+(.+?)\s*%\}").unwrap());

/// Text with every include marker replaced by the target's content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expansion {
    /// Fully expanded text.
    pub text: String,
    /// Number of markers replaced, nested ones included.
    pub substitutions: usize,
}

/// Strip one pair of matching quotes around an include path.
fn unquote(raw: &str) -> &str {
    let raw = raw.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = raw
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner.trim();
        }
    }
    raw
}

/// Expand include markers in `source`.
///
/// `source_path` names the text being expanded. It seeds the cycle check
/// joined onto `working_dir`, the same way targets are recorded. A target that is already being expanded further up the chain fails with
/// [`BookError::IncludeCycle`]; an unreadable target fails with the storage
/// error.
pub fn expand_includes(
    storage: &dyn Storage,
    source: &str,
    source_path: &Path,
    working_dir: &Path,
) -> Result<Expansion, BookError> {
    let mut chain = vec![working_dir.join(source_path)];
    expand_inner(storage, source, working_dir, &mut chain)
}

fn expand_inner(
    storage: &dyn Storage,
    source: &str,
    working_dir: &Path,
    chain: &mut Vec<PathBuf>,
) -> Result<Expansion, BookError> {
    let mut text = String::with_capacity(source.len());
    let mut substitutions = 0;
    let mut last = 0;

    for caps in INCLUDE_PATTERN.captures_iter(source) {
        let marker = caps.get(0).unwrap();
        let target = working_dir.join(unquote(&caps[1]));

        if chain.contains(&target) {
            return Err(BookError::IncludeCycle {
                path: target,
                chain: chain.clone(),
            });
        }

        tracing::debug!(path = %target.display(), depth = chain.len(), "Expanding include");
        let content = storage.read(&target)?;

        chain.push(target);
        let nested = expand_inner(storage, &content, working_dir, chain)?;
        chain.pop();

        text.push_str(&source[last..marker.start()]);
        text.push_str(&nested.text);
        substitutions += 1 + nested.substitutions;
        last = marker.end();
    }

    text.push_str(&source[last..]);
    Ok(Expansion {
        text,
        substitutions,
    })
}
