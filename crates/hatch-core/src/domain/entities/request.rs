use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::{
    entities::{common::check_entry_name, descriptor::TemplateId},
    error::DomainError,
};

/// A project name that is legal as a directory entry on every supported
/// platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn parse(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        match check_entry_name(&name) {
            Ok(()) => Ok(Self(name)),
            Err(reason) => Err(DomainError::InvalidName { name, reason }),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// User input for one scaffolding action.
///
/// Fields are taken as given; the scaffolder validates them itself and never
/// relies on checks made by whoever built the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldRequest {
    project_name: String,
    target_parent: PathBuf,
    template_id: TemplateId,
}

impl ScaffoldRequest {
    pub fn new(
        project_name: impl Into<String>,
        target_parent: impl Into<PathBuf>,
        template_id: impl Into<TemplateId>,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            target_parent: target_parent.into(),
            template_id: template_id.into(),
        }
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// Directory the project root is created in.
    pub fn target_parent(&self) -> &Path {
        &self.target_parent
    }

    pub fn template_id(&self) -> &TemplateId {
        &self.template_id
    }
}

/// A successfully committed project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldedProject {
    /// Absolute path of the project root.
    pub root: PathBuf,
    /// Absolute path of the seed project file.
    pub project_file: PathBuf,
}
