//! Infrastructure adapters for Hatch.
//!
//! This crate implements the ports defined in `hatch_core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod descriptor;
pub mod filesystem;
pub mod template_repository;

// Re-export commonly used adapters
pub use descriptor::{DescriptorFormat, TomlDescriptorParser, XmlDescriptorParser};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use template_repository::TemplateRepository;
