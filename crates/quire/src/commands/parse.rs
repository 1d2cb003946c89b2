//! `quire parse` command implementation.

use std::path::PathBuf;

use clap::Args;
use console::Term;
use quire_book::{ResolveOptions, StructureKind, resolve_structure};
use quire_config::{CliSettings, Config};

use super::open_book;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the parse command.
#[derive(Args)]
pub(crate) struct ParseArgs {
    /// Structural file to parse: readme, summary, glossary or langs.
    #[arg(default_value = "summary")]
    kind: String,

    /// Path to configuration file (default: auto-discover book.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Book source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Read this file instead of the configured one.
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ParseArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let kind: StructureKind = self.kind.parse()?;

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let book = open_book(&config.build_resolved.source_dir, &config);
        let options = ResolveOptions::new(std::env::current_dir()?).with_summary(self.summary);

        match resolve_structure(&book, kind, &options)? {
            Some((file, structure)) => {
                output.info(&format!("Parsed {}", file.path().display()));
                let json = serde_json::to_string_pretty(&structure)?;
                Term::stdout().write_line(&json)?;
            }
            None => output.warning(&format!("No {kind} file found")),
        }

        Ok(())
    }
}
