// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Hatch.
//!
//! Pure data and rules: template descriptors, the catalog a scan produces,
//! scaffold requests and the resolved project structure. No filesystem
//! access happens here; all I/O goes through the ports in
//! `crate::application::ports`.
//!
//! - **No I/O**: parsing bytes and touching disk live in adapters
//! - **Immutable entities**: descriptors and catalogs never change once built
//! - **Validated construction**: invalid descriptors cannot be represented

pub mod entities;
pub mod error;

mod validation;

pub use entities::{
    catalog::{CatalogBuilder, ScanFailure, TemplateCatalog},
    common::{RelativePath, check_entry_name},
    descriptor::{SeedFile, TemplateDescriptor, TemplateDescriptorBuilder, TemplateId},
    project_structure::{DirectoryToCreate, FileToWrite, FsEntry, ProjectStructure},
    render::RenderContext,
    request::{ProjectName, ScaffoldRequest, ScaffoldedProject},
};

pub use error::{DomainError, ErrorCategory};
pub use validation::DomainValidator;
