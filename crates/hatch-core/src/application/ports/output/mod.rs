//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `hatch-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::{DomainError, TemplateCatalog, TemplateDescriptor, TemplateId};
use crate::error::HatchResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `hatch_adapters::filesystem::LocalFilesystem` (production)
/// - `hatch_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists (file, directory or dangling link).
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is an existing directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Create exactly one directory. Fails if it already exists.
    fn create_dir(&self, path: &Path) -> HatchResult<()>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> HatchResult<()>;

    /// Read a whole file.
    fn read_file(&self, path: &Path) -> HatchResult<Vec<u8>>;

    /// Write content to a file, creating or truncating it.
    fn write_file(&self, path: &Path, content: &[u8]) -> HatchResult<()>;

    /// Move `from` to `to` in one step. Must fail, never overwrite, when
    /// `to` already exists.
    fn rename_no_replace(&self, from: &Path, to: &Path) -> HatchResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> HatchResult<()>;

    /// Make `path` absolute without requiring it to exist.
    fn absolute(&self, path: &Path) -> HatchResult<PathBuf>;
}

/// Port for turning descriptor file bytes into a [`TemplateDescriptor`].
///
/// Implemented by:
/// - `hatch_adapters::descriptor::XmlDescriptorParser` (`template.xml`)
/// - `hatch_adapters::descriptor::TomlDescriptorParser` (`template.toml`)
pub trait DescriptorParser: Send + Sync {
    /// File name that marks a directory as a template root.
    fn file_name(&self) -> &'static str;

    /// Parse one descriptor. `source_dir` is the template directory.
    fn parse(
        &self,
        id: TemplateId,
        source_dir: &Path,
        bytes: &[u8],
    ) -> Result<TemplateDescriptor, DomainError>;
}

/// Port for discovering templates under a root directory.
///
/// Implemented by `hatch_adapters::TemplateRepository`.
pub trait TemplateScanner: Send + Sync {
    /// Build a catalog of every template under `root`.
    ///
    /// Only a missing root is an error; per-template problems are recorded
    /// in [`TemplateCatalog::failures`].
    fn scan(&self, root: &Path) -> HatchResult<TemplateCatalog>;
}
