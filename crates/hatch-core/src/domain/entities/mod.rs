pub mod catalog;
pub mod common;
pub mod descriptor;
pub mod project_structure;
pub mod render;
pub mod request;

pub use crate::domain::DomainError;
pub use catalog::{CatalogBuilder, ScanFailure, TemplateCatalog};
pub use descriptor::{TemplateDescriptor, TemplateId};
pub use project_structure::ProjectStructure;
pub use common::RelativePath;
pub use request::{ProjectName, ScaffoldRequest, ScaffoldedProject};
