//! Page rendering and generation for Quire.
//!
//! [`generate_pages`] drives a [`Generator`] over a book's pages:
//!
//! - [`Generator::AssetOnly`] leaves the [`Output`] untouched
//! - [`Generator::PageAware`] renders each page with the [`PageRenderer`]
//!   and hands the [`ResultPage`] to its [`PageHandler`], threading the
//!   [`Output`] from one page to the next
//!
//! Two handlers ship with the crate: [`HtmlGenerator`] and [`JsonGenerator`].
//!
//! # Example
//!
//! ```ignore
//! use quire_output::{Generator, HtmlGenerator, Output, generate_pages};
//!
//! let output = Output::new(book.storage(), loaded.into_pages(), "_book");
//! let generator = Generator::page_aware(HtmlGenerator::new("My Book"));
//! let output = generate_pages(&generator, output, None)?;
//! println!("{} files written", output.emitted().len());
//! ```

mod error;
mod generate;
mod generator;
mod html;
mod json;
mod output;
mod render;

pub use error::GenerateError;
pub use generate::{generate_pages, render_page};
pub use generator::{Generator, PageHandler};
pub use html::HtmlGenerator;
pub use json::JsonGenerator;
pub use output::{Output, ResultPage, output_path_for};
pub use render::PageRenderer;
