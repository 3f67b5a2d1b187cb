//! `template.toml` descriptors.
//!
//! ```toml
//! name         = "Empty Project"
//! description  = "Optional text"           # optional
//! project_file = "project.doors_engine"
//! folders      = [".DoorsEngine", "Content", "GameCode"]
//!
//! [[seed_files]]
//! source      = "seed/main.cpp"
//! destination = "GameCode/main.cpp"
//! substitute  = true                       # optional, default false
//! ```

use std::path::Path;

use serde::Deserialize;

use hatch_core::{
    application::ports::DescriptorParser,
    domain::{DomainError, TemplateDescriptor, TemplateId},
};

// ── Manifest types ────────────────────────────────────────────────────────────

/// Deserialised representation of a `template.toml` file.
#[derive(Debug, Deserialize, Clone)]
struct TemplateManifest {
    name: Option<String>,
    description: Option<String>,
    project_file: Option<String>,
    #[serde(default)]
    folders: Vec<String>,
    #[serde(default)]
    seed_files: Vec<SeedFileEntry>,
}

/// One entry under `[[seed_files]]`.
#[derive(Debug, Deserialize, Clone)]
struct SeedFileEntry {
    source: String,
    destination: String,
    #[serde(default)]
    substitute: bool,
}

// ── Parser ────────────────────────────────────────────────────────────────────

/// Parses `template.toml` descriptors.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlDescriptorParser;

impl TomlDescriptorParser {
    pub const FILE_NAME: &'static str = "template.toml";
}

impl DescriptorParser for TomlDescriptorParser {
    fn file_name(&self) -> &'static str {
        Self::FILE_NAME
    }

    fn parse(
        &self,
        id: TemplateId,
        source_dir: &Path,
        bytes: &[u8],
    ) -> Result<TemplateDescriptor, DomainError> {
        let raw = std::str::from_utf8(bytes)
            .map_err(|e| DomainError::parse(format!("descriptor is not UTF-8: {e}")))?;
        let manifest: TemplateManifest =
            ::toml::from_str(raw).map_err(|e| DomainError::parse(e.to_string()))?;

        let mut builder = TemplateDescriptor::builder(id)
            .folders(manifest.folders)
            .source_dir(source_dir);
        if let Some(name) = manifest.name {
            builder = builder.display_name(name);
        }
        if let Some(description) = manifest.description {
            builder = builder.description(description);
        }
        if let Some(project_file) = manifest.project_file {
            builder = builder.project_file_name(project_file);
        }
        for seed in manifest.seed_files {
            builder = builder.seed_file(seed.source, seed.destination, seed.substitute);
        }

        builder.build()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
