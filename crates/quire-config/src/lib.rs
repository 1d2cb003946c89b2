//! Configuration management for Quire.
//!
//! Parses `book.toml` with serde and discovers it in the current directory or
//! any parent. Values given on the command line are applied on top through
//! [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! `book.title` and `book.author` support `${VAR}` and `${VAR:-default}`.

mod expand;

use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "book.toml";

/// Default output directory name, relative to the config file.
pub const DEFAULT_OUTPUT_DIR: &str = "_book";

/// CLI settings that override configuration file values.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override book source directory.
    pub source_dir: Option<PathBuf>,
    /// Override build output directory.
    pub output_dir: Option<PathBuf>,
    /// Override output format.
    pub format: Option<OutputFormat>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Book metadata.
    pub book: BookConfig,
    /// Names of the structural files.
    pub structure: StructureConfig,
    /// Build paths as written in TOML.
    build: BuildConfigRaw,

    /// Resolved build configuration (set after loading).
    #[serde(skip)]
    pub build_resolved: BuildConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Book metadata.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BookConfig {
    /// Book title.
    pub title: Option<String>,
    /// Book author.
    pub author: Option<String>,
}

/// File names of the structural files, relative to the book root.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StructureConfig {
    pub readme: String,
    pub summary: String,
    pub glossary: String,
    pub langs: String,
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self {
            readme: "README.md".to_owned(),
            summary: "SUMMARY.md".to_owned(),
            glossary: "GLOSSARY.md".to_owned(),
            langs: "LANGS.md".to_owned(),
        }
    }
}

/// Output format produced by `quire build`.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One HTML document per page.
    #[default]
    Html,
    /// One JSON document per page.
    Json,
}

impl OutputFormat {
    /// Format name as written in `book.toml`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "html" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unknown output format \"{other}\" (expected html or json)"
            ))),
        }
    }
}

/// Raw build configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct BuildConfigRaw {
    source_dir: Option<String>,
    output_dir: Option<String>,
    format: Option<OutputFormat>,
}

/// Resolved build configuration with absolute paths.
#[derive(Debug, Default)]
pub struct BuildConfig {
    /// Book root containing the structural files and pages.
    pub source_dir: PathBuf,
    /// Directory receiving generated files.
    pub output_dir: PathBuf,
    /// Output format.
    pub format: OutputFormat,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`book.title`").
        field: String,
        /// Error message (e.g., "${`BOOK_TITLE`} not set").
        message: String,
    },
}

/// Require a structure file name to be a plain relative path inside the book.
fn require_structure_name(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    let path = Path::new(value);
    if path.is_absolute() || path.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(ConfigError::Validation(format!(
            "{field} must be a relative path inside the book"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `book.toml` in current directory and parents,
    /// falling back to defaults rooted at the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails, or
    /// the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.build_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.build_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(format) = settings.format {
            self.build_resolved.format = format;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            book: BookConfig::default(),
            structure: StructureConfig::default(),
            build: BuildConfigRaw::default(),
            build_resolved: BuildConfig {
                source_dir: base.to_path_buf(),
                output_dir: base.join(DEFAULT_OUTPUT_DIR),
                format: OutputFormat::default(),
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_structure_name(&self.structure.readme, "structure.readme")?;
        require_structure_name(&self.structure.summary, "structure.summary")?;
        require_structure_name(&self.structure.glossary, "structure.glossary")?;
        require_structure_name(&self.structure.langs, "structure.langs")?;

        if self.build_resolved.output_dir == self.build_resolved.source_dir {
            return Err(ConfigError::Validation(
                "build.output_dir cannot be the book source directory".to_owned(),
            ));
        }

        Ok(())
    }

    /// Name of the output directory, excluded when scanning for content.
    pub fn output_dir_name(&self) -> Option<String> {
        self.build_resolved
            .output_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref title) = self.book.title {
            self.book.title = Some(expand::expand_env(title, "book.title")?);
        }
        if let Some(ref author) = self.book.author {
            self.book.author = Some(expand::expand_env(author, "book.author")?);
        }
        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.build_resolved = BuildConfig {
            source_dir: self
                .build
                .source_dir
                .as_deref()
                .map_or_else(|| config_dir.to_path_buf(), |dir| config_dir.join(dir)),
            output_dir: resolve(self.build.output_dir.as_deref(), DEFAULT_OUTPUT_DIR),
            format: self.build.format.unwrap_or_default(),
        };
    }
}
