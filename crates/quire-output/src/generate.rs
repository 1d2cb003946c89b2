//! Page generation sequencing.
//!
//! Pages are folded one at a time: each is rendered against the current
//! [`Output`] and handed to the generator, whose returned state becomes the
//! input for the next page. The first failure stops the run.

use std::path::Path;

use quire_book::Page;

use crate::error::GenerateError;
use crate::generator::Generator;
use crate::output::{Output, ResultPage};

/// Render one page against the current state.
pub fn render_page(output: &Output, page: &Page) -> Result<ResultPage, GenerateError> {
    output.renderer().render(output.storage(), page)
}

/// Path rendered with `/` separators, whatever the platform.
fn slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Pages to process for an optional target.
///
/// A target selects the first page whose path string ends with it, so
/// `q.md` matches `faq.md`. When nothing matches, the first page of the
/// book is generated instead so a run never processes zero pages of a
/// non-empty book.
fn select_pages(pages: &[Page], target: Option<&Path>) -> Vec<Page> {
    let Some(target) = target else {
        return pages.to_vec();
    };

    let suffix = slash_path(target);
    if let Some(page) = pages
        .iter()
        .find(|page| slash_path(page.path()).ends_with(&suffix))
    {
        return vec![page.clone()];
    }

    tracing::warn!(
        target = %target.display(),
        "Target page not found, generating the first page instead"
    );
    pages.first().cloned().into_iter().collect()
}

/// Generate the pages of `output` with `generator`.
///
/// [`Generator::AssetOnly`] returns `output` untouched. Otherwise every
/// selected page is rendered then emitted, strictly in order; a failure is
/// logged with the page path and returned as-is. Artifacts emitted before
/// the failure stay on disk.
pub fn generate_pages(
    generator: &Generator,
    output: Output,
    target: Option<&Path>,
) -> Result<Output, GenerateError> {
    let Generator::PageAware(handler) = generator else {
        return Ok(output);
    };

    let pages = select_pages(output.pages(), target);
    tracing::debug!(generator = handler.name(), pages = pages.len(), "Generating pages");

    pages.iter().try_fold(output, |out, page| {
        let path = page.path();
        tracing::debug!(page = %path.display(), "Generating page");

        render_page(&out, page)
            .and_then(|result| handler.on_page(out, result))
            .inspect_err(|e| {
                tracing::error!(page = %path.display(), error = %e, "Error generating page");
            })
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use quire_storage::MockStorage;

    use super::*;
    use crate::generator::PageHandler;

    /// Records each page by pushing its source path to `emitted`.
    struct Recorder {
        fail_on: Option<PathBuf>,
    }

    impl PageHandler for Recorder {
        fn name(&self) -> &'static str {
            "recorder"
        }

        fn on_page(&self, output: Output, page: ResultPage) -> Result<Output, GenerateError> {
            if self.fail_on.as_deref() == Some(page.path.as_path()) {
                return Err(GenerateError::Io {
                    path: page.path,
                    source: std::io::Error::other("disk full"),
                });
            }
            Ok(output.with_emitted(page.path))
        }
    }

    fn book_storage() -> Arc<MockStorage> {
        Arc::new(
            MockStorage::new()
                .with_file("README.md", "# Intro")
                .with_file("guide/setup.md", "# Setup")
                .with_file("guide/usage.md", "# Usage")
                .with_file("faq.md", "# FAQ"),
        )
    }

    fn pages() -> Vec<Page> {
        ["README.md", "guide/setup.md", "guide/usage.md", "faq.md"]
            .into_iter()
            .map(|p| Page::new(p, None))
            .collect()
    }

    fn output(storage: &Arc<MockStorage>) -> Output {
        Output::new(Arc::<MockStorage>::clone(storage), pages(), "/out")
    }

    fn recorder(fail_on: Option<&str>) -> Generator {
        Generator::page_aware(Recorder {
            fail_on: fail_on.map(PathBuf::from),
        })
    }

    #[test]
    fn test_asset_only_is_identity() {
        let storage = book_storage();

        let result = generate_pages(&Generator::AssetOnly, output(&storage), None).unwrap();
        assert_eq!(result.pages(), pages().as_slice());
        assert!(result.emitted().is_empty());
        assert!(storage.reads().is_empty());

        let targeted =
            generate_pages(&Generator::AssetOnly, output(&storage), Some(Path::new("faq.md"))).unwrap();
        assert!(targeted.emitted().is_empty());
    }

    #[test]
    fn test_all_pages_in_order() {
        let storage = book_storage();

        let result = generate_pages(&recorder(None), output(&storage), None).unwrap();
        let expected: Vec<PathBuf> = pages().iter().map(|p| p.path().to_path_buf()).collect();
        assert_eq!(result.emitted(), expected.as_slice());
        assert_eq!(storage.reads(), expected);
    }

    #[test]
    fn test_target_selects_single_page() {
        let storage = book_storage();

        let result =
            generate_pages(&recorder(None), output(&storage), Some(Path::new("setup.md"))).unwrap();
        assert_eq!(result.emitted(), [PathBuf::from("guide/setup.md")]);
        assert_eq!(storage.reads(), vec![PathBuf::from("guide/setup.md")]);
    }

    #[test]
    fn test_target_matches_path_suffix() {
        let storage = book_storage();

        let result =
            generate_pages(&recorder(None), output(&storage), Some(Path::new("q.md"))).unwrap();
        assert_eq!(result.emitted(), [PathBuf::from("faq.md")]);

        let nested =
            generate_pages(&recorder(None), output(&storage), Some(Path::new("guide/usage.md"))).unwrap();
        assert_eq!(nested.emitted(), [PathBuf::from("guide/usage.md")]);
    }

    #[test]
    fn test_unmatched_target_generates_first_page() {
        let storage = book_storage();

        let result =
            generate_pages(&recorder(None), output(&storage), Some(Path::new("missing.md"))).unwrap();
        assert_eq!(result.emitted(), [PathBuf::from("README.md")]);
    }

    #[test]
    fn test_empty_book_with_target() {
        let storage = book_storage();
        let empty = Output::new(storage, Vec::new(), "/out");

        let result = generate_pages(&recorder(None), empty, Some(Path::new("README.md"))).unwrap();
        assert!(result.emitted().is_empty());
    }

    #[test]
    fn test_failure_stops_fold() {
        let storage = book_storage();

        let err = generate_pages(&recorder(Some("guide/usage.md")), output(&storage), None).unwrap_err();
        assert!(matches!(err, GenerateError::Io { ref path, .. } if path == Path::new("guide/usage.md")));
        assert_eq!(
            storage.reads(),
            vec![
                PathBuf::from("README.md"),
                PathBuf::from("guide/setup.md"),
                PathBuf::from("guide/usage.md"),
            ]
        );
    }

    #[test]
    fn test_render_failure_stops_fold() {
        let storage = Arc::new(MockStorage::new().with_file("README.md", "# Intro"));
        let pages = vec![Page::new("README.md", None), Page::new("gone.md", None), Page::new("after.md", None)];
        let output = Output::new(Arc::<MockStorage>::clone(&storage), pages, "/out");

        let err = generate_pages(&recorder(None), output, None).unwrap_err();
        assert!(matches!(err, GenerateError::Storage(_)));
        assert_eq!(storage.reads(), vec![PathBuf::from("README.md")]);
    }
}
