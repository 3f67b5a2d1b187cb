//! Template descriptor aggregate.
//!
//! A [`TemplateDescriptor`] is the parsed, validated form of one template
//! directory's definition file. Descriptors are only ever produced through
//! [`TemplateDescriptorBuilder::build`], which enforces every invariant:
//!
//! - the project file name is a single legal entry name
//! - folder paths are unique after normalization
//! - no folder, seed source or seed destination escapes its root
//! - no two seed files share a destination
//!
//! Once built a descriptor never changes; a rescan produces new ones.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::{
    entities::common::{RelativePath, check_entry_name},
    error::DomainError,
};

/// Identity of a template inside one repository scan.
///
/// Derived from the name of the directory holding the descriptor file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TemplateId(String);

impl TemplateId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive the id from a template directory (its final component).
    pub fn from_dir(dir: &Path) -> Result<Self, DomainError> {
        dir.file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .map(Self::new)
            .ok_or_else(|| {
                DomainError::parse(format!(
                    "cannot derive a template id from '{}'",
                    dir.display()
                ))
            })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TemplateId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TemplateId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One file copied from the template directory into the new project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedFile {
    /// Relative to the template directory.
    pub source: RelativePath,
    /// Relative to the new project root.
    pub destination: RelativePath,
    /// Whether `{{TOKEN}}` substitution is applied to the content.
    pub substitute: bool,
}

/// Parsed and validated template definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDescriptor {
    id: TemplateId,
    display_name: String,
    description: Option<String>,
    project_file_name: String,
    folders: Vec<RelativePath>,
    seed_files: Vec<SeedFile>,
    source_dir: PathBuf,
}

impl TemplateDescriptor {
    pub fn builder(id: impl Into<TemplateId>) -> TemplateDescriptorBuilder {
        TemplateDescriptorBuilder::new(id)
    }

    pub fn id(&self) -> &TemplateId {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn project_file_name(&self) -> &str {
        &self.project_file_name
    }

    /// Folders in declared order.
    pub fn folders(&self) -> &[RelativePath] {
        &self.folders
    }

    pub fn seed_files(&self) -> &[SeedFile] {
        &self.seed_files
    }

    /// Directory the descriptor was loaded from. Seed sources resolve here.
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Absolute location of a seed file's source.
    pub fn seed_source_path(&self, seed: &SeedFile) -> PathBuf {
        self.source_dir.join(seed.source.as_path())
    }
}

/// Builder that collects raw descriptor fields and validates them on
/// [`build`](Self::build).
#[derive(Debug, Default, Clone)]
pub struct TemplateDescriptorBuilder {
    id: Option<TemplateId>,
    display_name: Option<String>,
    description: Option<String>,
    project_file_name: Option<String>,
    folders: Vec<String>,
    seed_files: Vec<(String, String, bool)>,
    source_dir: PathBuf,
}

impl TemplateDescriptorBuilder {
    pub fn new(id: impl Into<TemplateId>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn project_file_name(mut self, name: impl Into<String>) -> Self {
        self.project_file_name = Some(name.into());
        self
    }

    pub fn folder(mut self, path: impl Into<String>) -> Self {
        self.folders.push(path.into());
        self
    }

    pub fn folders<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.folders.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn seed_file(
        mut self,
        source: impl Into<String>,
        destination: impl Into<String>,
        substitute: bool,
    ) -> Self {
        self.seed_files
            .push((source.into(), destination.into(), substitute));
        self
    }

    pub fn source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = dir.into();
        self
    }

    pub fn build(self) -> Result<TemplateDescriptor, DomainError> {
        let id = self.id.ok_or(DomainError::MissingRequiredField { field: "id" })?;

        let display_name = self
            .display_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or(DomainError::MissingRequiredField { field: "name" })?;

        let project_file_name = self
            .project_file_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or(DomainError::MissingRequiredField {
                field: "projectFile",
            })?;
        check_entry_name(&project_file_name).map_err(|reason| {
            DomainError::InvalidTemplate(format!(
                "project file name '{project_file_name}' is invalid: {reason}"
            ))
        })?;

        let mut seen = HashSet::new();
        let mut folders = Vec::with_capacity(self.folders.len());
        for raw in &self.folders {
            let folder = RelativePath::try_new(raw)?;
            if !seen.insert(folder.clone()) {
                return Err(DomainError::DuplicatePath {
                    path: folder.to_string(),
                });
            }
            folders.push(folder);
        }

        let mut destinations = HashSet::new();
        let mut seed_files = Vec::with_capacity(self.seed_files.len());
        for (source, destination, substitute) in &self.seed_files {
            let seed = SeedFile {
                source: RelativePath::try_new(source)?,
                destination: RelativePath::try_new(destination)?,
                substitute: *substitute,
            };
            if seen.contains(&seed.destination) || !destinations.insert(seed.destination.clone())
            {
                return Err(DomainError::DuplicatePath {
                    path: seed.destination.to_string(),
                });
            }
            seed_files.push(seed);
        }

        Ok(TemplateDescriptor {
            id,
            display_name,
            description: self
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            project_file_name,
            folders,
            seed_files,
            source_dir: self.source_dir,
        })
    }
}
