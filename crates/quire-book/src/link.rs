//! Summary link targets as book-relative paths.

use std::path::{Component, Path};

/// Storage path with `/` separators.
pub(crate) fn slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Resolve a link `target` written in a file under `base_dir`.
///
/// The anchor is dropped, `.` and `..` segments are folded and a leading `/`
/// anchors the target at the book root. Returns `None` for external links,
/// anchor-only links and targets that climb above the book root.
pub(crate) fn resolve_link(base_dir: &Path, target: &str) -> Option<String> {
    if target.contains("://") || target.starts_with("mailto:") {
        return None;
    }
    let target = target.split('#').next().unwrap_or_default();
    if target.is_empty() {
        return None;
    }

    let mut segments: Vec<String> = Vec::new();
    let (base, target) = match target.strip_prefix('/') {
        Some(rooted) => (Path::new(""), rooted),
        None => (base_dir, target),
    };
    for component in base.components() {
        match component {
            Component::Normal(name) => segments.push(name.to_string_lossy().into_owned()),
            Component::ParentDir => {
                segments.pop()?;
            }
            _ => {}
        }
    }

    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            name => segments.push(name.to_owned()),
        }
    }

    (!segments.is_empty()).then(|| segments.join("/"))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_resolve_link() {
        let root = Path::new("");
        assert_eq!(resolve_link(root, "a/b.md#c").as_deref(), Some("a/b.md"));
        assert_eq!(resolve_link(root, "./a.md").as_deref(), Some("a.md"));
        assert_eq!(resolve_link(root, "#top"), None);
        assert_eq!(resolve_link(root, "https://example.com/a.md"), None);
        assert_eq!(resolve_link(root, "mailto:team@example.com"), None);
        assert_eq!(resolve_link(root, "../outside.md"), None);
    }

    #[test]
    fn test_resolve_link_against_subdirectory() {
        let docs = Path::new("docs");
        assert_eq!(resolve_link(docs, "one.md").as_deref(), Some("docs/one.md"));
        assert_eq!(resolve_link(docs, "./guide/../two.md").as_deref(), Some("docs/two.md"));
        assert_eq!(resolve_link(docs, "../README.md").as_deref(), Some("README.md"));
        assert_eq!(resolve_link(docs, "/faq.md").as_deref(), Some("faq.md"));
    }

    #[test]
    fn test_slash_path() {
        assert_eq!(slash_path(Path::new("a/b/c.md")), "a/b/c.md");
        assert_eq!(slash_path(Path::new("README.md")), "README.md");
    }
}
