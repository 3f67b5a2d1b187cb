//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `HATCH_` prefix, `__` between sections,
//!    e.g. `HATCH_TEMPLATES__ROOT=/srv/templates`
//! 3. Config file: `--config FILE`, else [`AppConfig::default_path`]
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use hatch_adapters::DescriptorFormat;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where templates are discovered.
    pub templates: TemplateConfig,
    /// Default values for new projects.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateConfig {
    pub root: PathBuf,
    pub format: DescriptorFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defaults {
    /// Parent directory for `hatch new` when `--path` is not given.
    pub location: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `auto`, `human`, `plain` or `json`; used when `--output-format` is `auto`.
    pub format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            templates: TemplateConfig {
                root: PathBuf::from("templates"),
                format: DescriptorFormat::Xml,
            },
            defaults: Defaults {
                location: PathBuf::from("."),
            },
            output: OutputConfig {
                no_color: false,
                format: "auto".into(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, the config file and the environment.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.to_path_buf(), true),
            None => (Self::default_path(), false),
        };

        let defaults =
            Config::try_from(&Self::default()).context("Failed to encode built-in defaults")?;

        let config = Config::builder()
            .add_source(defaults)
            .add_source(
                File::from(path.as_path())
                    .format(FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                Environment::with_prefix("HATCH")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        config
            .try_deserialize()
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    /// The file `load` reads for the given `--config` value.
    pub fn config_path(config_file: Option<&Path>) -> PathBuf {
        config_file
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_path)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.hatch.toml` in the current directory.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "hatch", "hatch")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".hatch.toml"))
    }

    /// Look up a dotted key such as `templates.root`.
    ///
    /// Returns `None` for unknown keys and for whole sections.
    pub fn get(&self, key: &str) -> Option<String> {
        let mut value = toml::Value::try_from(self).ok()?;
        for segment in key.split('.') {
            value = value.get(segment)?.clone();
        }
        match value {
            toml::Value::String(s) => Some(s),
            toml::Value::Table(_) | toml::Value::Array(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// The configuration rendered as TOML, as written by `hatch init`.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
