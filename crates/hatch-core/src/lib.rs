//! Hatch Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Hatch
//! template discovery and project scaffolding engine, following hexagonal
//! (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            hatch-cli (CLI)              │
//! │       (Drives the use cases)            │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (ProjectScaffolder, TemplateService)   │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │ (Filesystem, DescriptorParser, Scanner) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     hatch-adapters (Infrastructure)     │
//! │ (LocalFilesystem, TemplateRepository)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (TemplateDescriptor, TemplateCatalog,   │
//! │  ScaffoldRequest, ProjectStructure)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hatch_core::prelude::*;
//!
//! // 1. Scan a template root (scanner from hatch-adapters)
//! let templates = TemplateService::scan(&repository, Path::new("templates"))?;
//! let descriptor = templates.get(&TemplateId::new("empty"))?;
//!
//! // 2. Scaffold
//! let scaffolder = ProjectScaffolder::new(Box::new(filesystem));
//! let request = ScaffoldRequest::new("Foo", "/tmp/ws", "empty");
//! let project = scaffolder.create(descriptor, &request)?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ProjectScaffolder, ScaffoldPlan, ScaffoldResult, TemplateInfo, TemplateService,
        ports::{DescriptorParser, Filesystem, TemplateScanner},
    };
    pub use crate::domain::{
        ProjectName, ScaffoldRequest, ScaffoldedProject, ScanFailure, TemplateCatalog,
        TemplateDescriptor, TemplateId,
    };
    pub use crate::error::{ErrorCategory, HatchError, HatchResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
