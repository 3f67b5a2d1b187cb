//! Filesystem-based template discovery.
//!
//! Walks a root directory, treats every directory holding a descriptor file
//! as one template, and builds a [`TemplateCatalog`] from them.
//!
//! # Directory layout expected
//!
//! ```text
//! templates/
//! ├── empty/
//! │   └── template.xml         ← descriptor; id = "empty"
//! └── game/
//!     ├── template.xml         ← id = "game"
//!     ├── seed/
//!     │   └── main.cpp         ← seed file source
//!     └── addons/
//!         └── net/
//!             └── template.xml ← nested template; id = "net"
//! ```
//!
//! A broken descriptor never stops the scan: it is logged at `WARN` and
//! recorded in [`TemplateCatalog::failures`].
//!
//! # Discovery order
//!
//! Entries of each directory are visited sorted by file name (byte order),
//! and a subdirectory is fully walked before the next sibling. In the layout
//! above `addons/` sorts before `template.xml`, so `net` is discovered before
//! `game`. When two descriptors share an id, the one discovered first is
//! kept and the other is recorded as a `DuplicateTemplateId` failure.
//!
//! Seed sources must resolve, after following links, to regular files inside
//! the template directory.

use std::{
    fs,
    path::{Path, PathBuf},
};

use rayon::prelude::*;
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use hatch_core::{
    application::{
        ApplicationError,
        ports::{DescriptorParser, TemplateScanner},
    },
    domain::{DomainError, ScanFailure, TemplateCatalog, TemplateDescriptor, TemplateId},
    error::HatchResult,
};

use crate::descriptor::DescriptorFormat;

/// Discovers templates under a root directory.
///
/// # Example
///
/// ```no_run
/// use hatch_adapters::{DescriptorFormat, TemplateRepository};
///
/// let repository = TemplateRepository::with_format(DescriptorFormat::Xml);
/// let catalog = repository.scan("./templates".as_ref())?;
/// println!("Found {} templates", catalog.len());
/// # Ok::<(), hatch_core::error::HatchError>(())
/// ```
pub struct TemplateRepository {
    parser: Box<dyn DescriptorParser>,
}

impl TemplateRepository {
    pub fn new(parser: Box<dyn DescriptorParser>) -> Self {
        Self { parser }
    }

    pub fn with_format(format: DescriptorFormat) -> Self {
        Self::new(format.parser())
    }

    /// Name of the file that marks a template directory.
    pub fn descriptor_file_name(&self) -> &'static str {
        self.parser.file_name()
    }

    /// Build a catalog of every template under `root`.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::RootNotFound`] if `root` is missing or is
    /// not a directory. Everything else is recorded as a scan failure.
    #[instrument(skip_all, fields(root = %root.display(), descriptor = self.parser.file_name()))]
    pub fn scan(&self, root: &Path) -> HatchResult<TemplateCatalog> {
        if !fs::metadata(root).is_ok_and(|m| m.is_dir()) {
            return Err(ApplicationError::RootNotFound {
                path: root.to_path_buf(),
            }
            .into());
        }

        // ── 1. Walk (sequential, sorted) ──────────────────────────────────
        let (candidates, walk_failures) = self.discover(root);
        debug!(candidates = candidates.len(), "Descriptor files found");

        // ── 2. Parse (parallel, order preserved) ──────────────────────────
        let parsed: Vec<(PathBuf, Result<TemplateDescriptor, DomainError>)> = candidates
            .into_par_iter()
            .map(|path| {
                let result = self.load(&path);
                (path, result)
            })
            .collect();

        // ── 3. Reduce in discovery order ──────────────────────────────────
        let mut builder = TemplateCatalog::builder();
        for failure in walk_failures {
            warn!(
                path = %failure.source_path.display(),
                error = %failure.error,
                "Unreadable entry under template root"
            );
            builder.record_failure(failure);
        }

        for (path, result) in parsed {
            match result {
                Ok(descriptor) => {
                    let id = descriptor.id().clone();
                    if builder.insert(descriptor, &path) {
                        debug!(id = %id, path = %path.display(), "Template discovered");
                    } else {
                        warn!(id = %id, path = %path.display(), "Duplicate template id, skipping");
                    }
                }
                Err(error) => {
                    warn!(path = %path.display(), error = %error, "Skipping invalid template");
                    builder.record_failure(ScanFailure::new(path, error));
                }
            }
        }

        let catalog = builder.build();
        debug!(
            templates = catalog.len(),
            failures = catalog.failures().len(),
            "Scan finished"
        );
        Ok(catalog)
    }

    /// Collect descriptor paths in walk order. Siblings are visited sorted by
    /// file name; symlinks are not followed.
    fn discover(&self, root: &Path) -> (Vec<PathBuf>, Vec<ScanFailure>) {
        let file_name = self.parser.file_name();
        let mut candidates = Vec::new();
        let mut failures = Vec::new();

        for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_file() && entry.file_name() == file_name {
                        candidates.push(entry.into_path());
                    }
                }
                Err(e) => {
                    let path = e.path().unwrap_or(root).to_path_buf();
                    failures.push(ScanFailure::new(
                        path,
                        DomainError::TemplateUnreadable {
                            reason: e.to_string(),
                        },
                    ));
                }
            }
        }

        (candidates, failures)
    }

    /// Read and parse one descriptor file.
    fn load(&self, descriptor_path: &Path) -> Result<TemplateDescriptor, DomainError> {
        let dir = descriptor_path.parent().ok_or_else(|| {
            DomainError::parse(format!(
                "'{}' has no containing directory",
                descriptor_path.display()
            ))
        })?;
        let source_dir = std::path::absolute(dir).map_err(|e| unreadable(dir, e))?;
        let id = TemplateId::from_dir(&source_dir)?;

        let bytes = fs::read(descriptor_path).map_err(|e| unreadable(descriptor_path, e))?;
        let descriptor = self.parser.parse(id, &source_dir, &bytes)?;

        let real_dir = fs::canonicalize(&source_dir).map_err(|e| unreadable(&source_dir, e))?;
        for seed in descriptor.seed_files() {
            check_seed_source(&real_dir, &descriptor.seed_source_path(seed), seed.source.as_str())?;
        }

        Ok(descriptor)
    }
}

impl TemplateScanner for TemplateRepository {
    fn scan(&self, root: &Path) -> HatchResult<TemplateCatalog> {
        TemplateRepository::scan(self, root)
    }
}

/// A seed source must be a regular file once links are resolved, and must
/// resolve inside the template directory.
fn check_seed_source(real_dir: &Path, source: &Path, declared: &str) -> Result<(), DomainError> {
    let resolved = fs::canonicalize(source)
        .ok()
        .filter(|p| p.is_file())
        .ok_or_else(|| {
            DomainError::InvalidTemplate(format!(
                "seed file '{declared}' not found in the template directory"
            ))
        })?;

    if !resolved.starts_with(real_dir) {
        return Err(DomainError::PathTraversalRejected {
            path: declared.to_string(),
            reason: "seed file resolves outside the template directory",
        });
    }
    Ok(())
}

fn unreadable(path: &Path, e: std::io::Error) -> DomainError {
    DomainError::TemplateUnreadable {
        reason: format!("{}: {e}", path.display()),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
