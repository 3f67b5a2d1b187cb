//! Template Service - read-only queries over a scanned catalog.
//!
//! Separated from `ProjectScaffolder` so listing templates never needs a
//! filesystem that can write.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, instrument};

use crate::{
    application::{ApplicationError, ports::TemplateScanner},
    domain::{ScanFailure, TemplateCatalog, TemplateDescriptor, TemplateId},
    error::HatchResult,
};

/// Information about a template for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub project_file: String,
    pub folders: usize,
    pub seed_files: usize,
    pub source_dir: PathBuf,
}

impl From<&TemplateDescriptor> for TemplateInfo {
    fn from(d: &TemplateDescriptor) -> Self {
        Self {
            id: d.id().to_string(),
            name: d.display_name().to_string(),
            description: d.description().unwrap_or_default().to_string(),
            project_file: d.project_file_name().to_string(),
            folders: d.folders().len(),
            seed_files: d.seed_files().len(),
            source_dir: d.source_dir().to_path_buf(),
        }
    }
}

/// Service for template lookups.
#[derive(Debug, Clone, Default)]
pub struct TemplateService {
    catalog: TemplateCatalog,
}

impl TemplateService {
    pub fn new(catalog: TemplateCatalog) -> Self {
        Self { catalog }
    }

    /// Scan `root` and wrap the resulting catalog.
    #[instrument(skip_all, fields(root = %root.display()))]
    pub fn scan(scanner: &dyn TemplateScanner, root: &Path) -> HatchResult<Self> {
        let catalog = scanner.scan(root)?;
        debug!(
            templates = catalog.len(),
            failures = catalog.failures().len(),
            "Catalog ready"
        );
        Ok(Self::new(catalog))
    }

    /// Summaries in discovery order.
    pub fn list(&self) -> Vec<TemplateInfo> {
        self.catalog.templates().iter().map(TemplateInfo::from).collect()
    }

    /// Get a descriptor by id.
    pub fn get(&self, id: &TemplateId) -> HatchResult<&TemplateDescriptor> {
        self.catalog.get(id).ok_or_else(|| {
            ApplicationError::TemplateNotFound {
                id: id.to_string(),
            }
            .into()
        })
    }

    pub fn failures(&self) -> &[ScanFailure] {
        self.catalog.failures()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }
}
