//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `hatch-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: file operations, including the non-replacing rename
//!   - `DescriptorParser`: descriptor bytes to `TemplateDescriptor`
//!   - `TemplateScanner`: directory tree to `TemplateCatalog`

pub mod output;

#[cfg(test)]
pub use output::MockFilesystem;
pub use output::{DescriptorParser, Filesystem, TemplateScanner};
