//! JSON generator: one document per page.

use std::path::Path;

use serde::Serialize;

use crate::error::GenerateError;
use crate::generator::PageHandler;
use crate::output::{Output, ResultPage, output_path_for};

#[derive(Serialize)]
struct JsonPage<'a> {
    path: &'a Path,
    title: Option<&'a str>,
    html: &'a str,
}

/// Writes each page as `{ "path", "title", "html" }`.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonGenerator;

impl PageHandler for JsonGenerator {
    fn name(&self) -> &'static str {
        "json"
    }

    fn on_page(&self, output: Output, page: ResultPage) -> Result<Output, GenerateError> {
        let document = serde_json::to_string_pretty(&JsonPage {
            path: &page.path,
            title: page.title.as_deref(),
            html: &page.html,
        })?;

        let rel = output_path_for(&page.path, "json");
        let written = output.write_artifact(&rel, &document)?;
        Ok(output.with_emitted(written))
    }
}
