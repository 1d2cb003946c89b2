//! Generation state threaded through the page fold.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use quire_book::Page;
use quire_storage::Storage;

use crate::error::GenerateError;
use crate::render::PageRenderer;

/// Accumulated state of one generation run.
///
/// Owned by a single step at a time: every [`PageHandler`](crate::PageHandler)
/// receives it by value and returns the state the next page starts from.
pub struct Output {
    storage: Arc<dyn Storage>,
    pages: Vec<Page>,
    root: PathBuf,
    renderer: PageRenderer,
    emitted: Vec<PathBuf>,
}

impl Output {
    /// Create the initial state for generating `pages` into `root`.
    pub fn new(storage: Arc<dyn Storage>, pages: Vec<Page>, root: impl Into<PathBuf>) -> Self {
        Self {
            storage,
            pages,
            root: root.into(),
            renderer: PageRenderer::new(),
            emitted: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_renderer(mut self, renderer: PageRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Storage pages are read from.
    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    /// Book pages in generation order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Directory artifacts are written to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn renderer(&self) -> &PageRenderer {
        &self.renderer
    }

    /// Artifacts written so far, in emission order.
    pub fn emitted(&self) -> &[PathBuf] {
        &self.emitted
    }

    /// Record an emitted artifact.
    #[must_use]
    pub fn with_emitted(mut self, path: PathBuf) -> Self {
        self.emitted.push(path);
        self
    }

    /// Write `contents` to `rel` under the output root, creating parent
    /// directories. Returns the full path written.
    pub fn write_artifact(&self, rel: &Path, contents: &str) -> Result<PathBuf, GenerateError> {
        let path = self.root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| GenerateError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, contents).map_err(|source| GenerateError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = contents.len(), "Wrote artifact");
        Ok(path)
    }
}

impl std::fmt::Debug for Output {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Output")
            .field("pages", &self.pages.len())
            .field("root", &self.root)
            .field("emitted", &self.emitted)
            .finish_non_exhaustive()
    }
}

/// A rendered page, ready to be emitted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultPage {
    /// Source path relative to the book root.
    pub path: PathBuf,
    pub title: Option<String>,
    pub html: String,
}

/// Output file path for a page source path.
///
/// `README` pages become `index`; every other page keeps its name with the
/// extension replaced:
///
/// ```ignore
/// assert_eq!(output_path_for(Path::new("guide/README.md"), "html"), PathBuf::from("guide/index.html"));
/// assert_eq!(output_path_for(Path::new("guide/setup.md"), "json"), PathBuf::from("guide/setup.json"));
/// ```
pub fn output_path_for(page_path: &Path, ext: &str) -> PathBuf {
    let is_readme = page_path
        .file_stem()
        .is_some_and(|stem| stem.eq_ignore_ascii_case("readme"));

    if is_readme {
        page_path.with_file_name("index").with_extension(ext)
    } else {
        page_path.with_extension(ext)
    }
}
