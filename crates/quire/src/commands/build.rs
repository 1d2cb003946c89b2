//! `quire build` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use quire_book::parser::Languages;
use quire_book::{Book, ResolveOptions, load_book, load_languages};
use quire_config::{CliSettings, Config, OutputFormat};
use quire_output::{
    Generator, HtmlGenerator, JsonGenerator, Output as BuildOutput, PageRenderer, generate_pages,
};

use super::open_book;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover book.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Book source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output directory (overrides config, default: _book).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format: html or json (overrides config).
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Summary file to use instead of the configured one.
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Only generate the page whose path ends with this path.
    #[arg(long)]
    file: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Per-book build settings shared by every language.
struct BuildPlan<'a> {
    format: OutputFormat,
    title: Option<&'a str>,
    author: Option<&'a str>,
    target: Option<&'a Path>,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            output_dir: self.output_dir,
            format: self.format,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let build = &config.build_resolved;

        output.field("Source", build.source_dir.display());
        output.field("Output", build.output_dir.display());
        output.field("Format", build.format);

        let options = ResolveOptions::new(std::env::current_dir()?).with_summary(self.summary);
        let plan = BuildPlan {
            format: build.format,
            title: config.book.title.as_deref(),
            author: config.book.author.as_deref(),
            target: self.file.as_deref(),
        };

        let book = open_book(&build.source_dir, &config);
        let languages = load_languages(&book, &options)?.filter(Languages::is_multilingual);

        let written = if let Some(languages) = languages {
            let mut written = 0;
            for language in &languages.languages {
                output.heading(&format!("Building {} ({})", language.title, language.path));
                let book = open_book(&build.source_dir.join(&language.path), &config);
                let out_dir = build.output_dir.join(&language.path);
                written += build_book(&book, &options, &out_dir, &plan)?.emitted().len();
            }
            written
        } else {
            build_book(&book, &options, &build.output_dir, &plan)?
                .emitted()
                .len()
        };

        output.success(&format!("Wrote {written} files"));
        Ok(())
    }
}

/// Load one book and generate its pages into `out_dir`.
fn build_book(
    book: &Book,
    options: &ResolveOptions,
    out_dir: &Path,
    plan: &BuildPlan<'_>,
) -> Result<BuildOutput, CliError> {
    let loaded = load_book(book, options)?;

    let title = plan
        .title
        .map_or_else(|| loaded.readme.title.clone(), str::to_owned);
    let generator = match plan.format {
        OutputFormat::Html => Generator::page_aware(
            HtmlGenerator::new(title).with_author(plan.author.map(str::to_owned)),
        ),
        OutputFormat::Json => Generator::page_aware(JsonGenerator),
    };
    let renderer = PageRenderer::new().with_link_rewrite(plan.format == OutputFormat::Html);

    let output = BuildOutput::new(book.storage(), loaded.into_pages(), out_dir).with_renderer(renderer);
    Ok(generate_pages(&generator, output, plan.target)?)
}
