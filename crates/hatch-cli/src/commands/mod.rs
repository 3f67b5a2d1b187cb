//! Subcommand handlers.
//!
//! Each module exposes an `execute` function that translates parsed
//! arguments into calls on `hatch-core` services and renders the result.

pub mod completions;
pub mod config;
pub mod init;
pub mod list;
pub mod new;

use std::path::Path;

use hatch_adapters::{DescriptorFormat, TemplateRepository};
use hatch_core::application::TemplateService;
use tracing::instrument;

use crate::{
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Scan `root` behind a spinner and surface every scan failure as a warning.
#[instrument(skip_all, fields(root = %root.display(), format = %format))]
pub(crate) fn scan_templates(
    root: &Path,
    format: DescriptorFormat,
    output: &OutputManager,
) -> CliResult<TemplateService> {
    scan(&TemplateRepository::with_format(format), root, output)
}

/// Like [`scan_templates`], but an empty catalog is an error.
#[instrument(skip_all, fields(root = %root.display(), format = %format))]
pub(crate) fn require_templates(
    root: &Path,
    format: DescriptorFormat,
    output: &OutputManager,
) -> CliResult<TemplateService> {
    let repository = TemplateRepository::with_format(format);
    let service = scan(&repository, root, output)?;
    if service.is_empty() {
        return Err(CliError::NoTemplates {
            root: root.to_path_buf(),
            descriptor: repository.descriptor_file_name(),
        });
    }
    Ok(service)
}

fn scan(
    repository: &TemplateRepository,
    root: &Path,
    output: &OutputManager,
) -> CliResult<TemplateService> {
    let spinner = output.spinner(&format!("Scanning {}", root.display()));
    let scanned = TemplateService::scan(repository, root);
    spinner.finish_and_clear();

    let service = scanned?;
    for failure in service.failures() {
        output.warning(&format!(
            "Skipped {}: {}",
            failure.source_path.display(),
            failure.error
        ))?;
    }
    Ok(service)
}
