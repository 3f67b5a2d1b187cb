use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::domain::{
    entities::descriptor::{TemplateDescriptor, TemplateId},
    error::DomainError,
};

/// A template directory that could not be cataloged, and why.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanFailure {
    pub source_path: PathBuf,
    pub error: DomainError,
}

impl ScanFailure {
    pub fn new(source_path: impl Into<PathBuf>, error: DomainError) -> Self {
        Self {
            source_path: source_path.into(),
            error,
        }
    }
}

/// Result of one repository scan: every valid descriptor keyed by id, in
/// discovery order, plus every failure encountered along the way.
///
/// Read-only once built; `Send + Sync` so one scan can serve many readers.
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: Vec<TemplateDescriptor>,
    index: HashMap<TemplateId, usize>,
    failures: Vec<ScanFailure>,
}

impl TemplateCatalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    pub fn get(&self, id: &TemplateId) -> Option<&TemplateDescriptor> {
        self.index.get(id).map(|&i| &self.templates[i])
    }

    /// Descriptors in discovery order.
    pub fn templates(&self) -> &[TemplateDescriptor] {
        &self.templates
    }

    pub fn ids(&self) -> impl Iterator<Item = &TemplateId> {
        self.templates.iter().map(|t| t.id())
    }

    pub fn failures(&self) -> &[ScanFailure] {
        &self.failures
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Accumulates scan results. The first descriptor seen for an id wins.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    catalog: TemplateCatalog,
}

impl CatalogBuilder {
    /// Add a descriptor. A second descriptor with an already-cataloged id is
    /// recorded as a [`DomainError::DuplicateTemplateId`] failure against
    /// `descriptor_path` and `false` is returned.
    pub fn insert(&mut self, descriptor: TemplateDescriptor, descriptor_path: &Path) -> bool {
        if let Some(existing) = self.catalog.get(descriptor.id()) {
            let error = DomainError::DuplicateTemplateId {
                id: descriptor.id().to_string(),
                first: existing.source_dir().to_path_buf(),
            };
            self.record_failure(ScanFailure::new(descriptor_path, error));
            return false;
        }

        let position = self.catalog.templates.len();
        self.catalog
            .index
            .insert(descriptor.id().clone(), position);
        self.catalog.templates.push(descriptor);
        true
    }

    pub fn record_failure(&mut self, failure: ScanFailure) {
        self.catalog.failures.push(failure);
    }

    pub fn build(self) -> TemplateCatalog {
        self.catalog
    }
}
