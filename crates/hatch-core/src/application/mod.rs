//! Application layer for Hatch.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ProjectScaffolder, TemplateService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business rules itself. Descriptor and path rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    ProjectScaffolder,
    ScaffoldPlan,
    ScaffoldResult,
    TemplateInfo, // DTO for template listings
    TemplateService,
};

pub use ports::{DescriptorParser, Filesystem, TemplateScanner};

pub use error::ApplicationError;
