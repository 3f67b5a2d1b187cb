//! Project Scaffolder - main application orchestrator.
//!
//! This service turns a descriptor and a request into a project on disk:
//! 1. Validate the request and resolve every path and file (`plan`)
//! 2. Build the project inside a hidden staging directory
//! 3. Commit with a non-replacing rename, or remove the staging directory
//!
//! Other processes never observe a half-built project at the final path.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{
        DomainValidator as validator, FsEntry, ProjectName, ProjectStructure, RelativePath,
        RenderContext, ScaffoldRequest, ScaffoldedProject, TemplateDescriptor,
    },
    error::{HatchError, HatchResult},
};

/// Outcome of [`ProjectScaffolder::create`].
pub type ScaffoldResult = HatchResult<ScaffoldedProject>;

const STAGING_MARKER: &str = ".hatch-staging-";

/// Longest slice of the project name kept in a staging directory name, so
/// the staging entry stays under the 255-byte limit.
const STAGING_NAME_PREFIX_MAX: usize = 64;

/// Everything `create` would write, resolved and validated, with nothing
/// touched on disk yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldPlan {
    project_name: ProjectName,
    parent: PathBuf,
    root: PathBuf,
    project_file: RelativePath,
    structure: ProjectStructure,
}

impl ScaffoldPlan {
    pub fn project_name(&self) -> &ProjectName {
        &self.project_name
    }

    /// Absolute directory the project is created in.
    pub fn parent(&self) -> &Path {
        &self.parent
    }

    /// Absolute final project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of the project file after commit.
    pub fn project_file_path(&self) -> PathBuf {
        self.root.join(self.project_file.as_path())
    }

    pub fn structure(&self) -> &ProjectStructure {
        &self.structure
    }
}

/// Main scaffolding service.
pub struct ProjectScaffolder {
    filesystem: Box<dyn Filesystem>,
}

impl ProjectScaffolder {
    /// Create a scaffolder over the given filesystem adapter.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use hatch_core::application::ProjectScaffolder;
    ///
    /// let scaffolder = ProjectScaffolder::new(Box::new(filesystem));
    /// let project = scaffolder.create(&descriptor, &request)?;
    /// ```
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Validate `request` against `descriptor` and resolve the full project
    /// layout without writing anything.
    ///
    /// Seed sources are read here, so a missing seed file fails before any
    /// directory is created.
    #[instrument(
        skip_all,
        fields(
            template = %descriptor.id(),
            project = %request.project_name(),
            parent = %request.target_parent().display()
        )
    )]
    pub fn plan(
        &self,
        descriptor: &TemplateDescriptor,
        request: &ScaffoldRequest,
    ) -> HatchResult<ScaffoldPlan> {
        // 1. Name and template identity
        let project_name = validator::validate_project_name(request.project_name())?;
        if !validator::validate_template_id(descriptor, request.template_id()) {
            return Err(ApplicationError::TemplateNotFound {
                id: request.template_id().to_string(),
            }
            .into());
        }

        // 2. Target location
        let parent = self.filesystem.absolute(request.target_parent())?;
        if self.filesystem.exists(&parent) && !self.filesystem.is_dir(&parent) {
            return Err(ApplicationError::StagingFailed {
                path: parent,
                reason: "target location is not a directory".into(),
            }
            .into());
        }

        let root = parent.join(project_name.as_str());
        if self.filesystem.exists(&root) {
            return Err(ApplicationError::ProjectExists { path: root }.into());
        }

        // 3. Resolve content
        let context = RenderContext::for_project(&project_name, descriptor);
        let (project_file, structure) = self.resolve_structure(descriptor, &context)?;
        debug!(entries = structure.entry_count(), "Scaffold planned");

        Ok(ScaffoldPlan {
            project_name,
            parent,
            root,
            project_file,
            structure,
        })
    }

    /// Scaffold a new project, all or nothing.
    #[instrument(
        skip_all,
        fields(
            template = %descriptor.id(),
            project = %request.project_name(),
            parent = %request.target_parent().display()
        )
    )]
    pub fn create(
        &self,
        descriptor: &TemplateDescriptor,
        request: &ScaffoldRequest,
    ) -> ScaffoldResult {
        let plan = self.plan(descriptor, request)?;
        self.execute(&plan)
    }

    /// Write a previously computed plan.
    ///
    /// The final path is only claimed by the closing rename, so a plan that
    /// went stale (someone else created the root meanwhile) fails with
    /// `CommitConflict` instead of merging.
    pub fn execute(&self, plan: &ScaffoldPlan) -> ScaffoldResult {
        self.filesystem
            .create_dir_all(&plan.parent)
            .map_err(|e| staging_failed(&plan.parent, &e))?;

        let staging = plan.parent.join(staging_dir_name(&plan.project_name));
        self.filesystem
            .create_dir(&staging)
            .map_err(|e| staging_failed(&staging, &e))?;
        debug!(staging = %staging.display(), "Staging directory created");

        if let Err(e) = self.write_all(&staging, &plan.structure) {
            warn!(error = %e, "Staging failed");
            return Err(self.abandon(&staging, e));
        }

        if let Err(e) = self.filesystem.rename_no_replace(&staging, &plan.root) {
            let err: HatchError = ApplicationError::CommitConflict {
                path: plan.root.clone(),
                reason: fs_reason(&e),
            }
            .into();
            warn!(error = %err, "Commit failed");
            return Err(self.abandon(&staging, err));
        }

        info!(root = %plan.root.display(), "Project created");
        Ok(ScaffoldedProject {
            root: plan.root.clone(),
            project_file: plan.project_file_path(),
        })
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn resolve_structure(
        &self,
        descriptor: &TemplateDescriptor,
        context: &RenderContext,
    ) -> HatchResult<(RelativePath, ProjectStructure)> {
        let mut structure = ProjectStructure::new();

        for folder in descriptor.folders() {
            let path = validator::validate_rendered_path(&context.render(folder.as_str()))?;
            structure.add_directory(path);
        }

        // The first seed file targeting the same path fills this empty
        // placeholder; any other collision is a duplicate.
        let project_file = validator::validate_rendered_project_file(
            &context.render(descriptor.project_file_name()),
        )?;
        structure.add_file(project_file.clone(), Vec::new());
        let mut placeholder_free = true;

        for seed in descriptor.seed_files() {
            let source = descriptor.seed_source_path(seed);
            let bytes = self
                .filesystem
                .read_file(&source)
                .map_err(|e| staging_failed(&source, &e))?;

            let content = if seed.substitute {
                let text = String::from_utf8(bytes).map_err(|_| ApplicationError::StagingFailed {
                    path: source.clone(),
                    reason: "seed file marked for substitution is not valid UTF-8".into(),
                })?;
                context.render(&text).into_bytes()
            } else {
                bytes
            };

            let destination =
                validator::validate_rendered_path(&context.render(seed.destination.as_str()))?;
            if placeholder_free && destination == project_file {
                placeholder_free = false;
                structure.fill_file(&destination, content);
            } else {
                structure.add_file(destination, content);
            }
        }

        validator::validate_project_structure(&structure)?;
        Ok((project_file, structure))
    }

    /// Write all entries under the staging root.
    fn write_all(&self, staging: &Path, structure: &ProjectStructure) -> HatchResult<()> {
        for entry in structure.entries() {
            let path = staging.join(entry.path().as_path());
            match entry {
                FsEntry::Directory(_) => {
                    self.filesystem
                        .create_dir_all(&path)
                        .map_err(|e| staging_failed(&path, &e))?;
                }
                FsEntry::File(file) => {
                    if let Some(parent) = path.parent() {
                        self.filesystem
                            .create_dir_all(parent)
                            .map_err(|e| staging_failed(parent, &e))?;
                    }
                    self.filesystem
                        .write_file(&path, &file.content)
                        .map_err(|e| staging_failed(&path, &e))?;
                }
            }
        }
        Ok(())
    }

    /// Remove the staging directory after a failure and return the error to
    /// report. A failed removal is attached, never dropped.
    fn abandon(&self, staging: &Path, original: HatchError) -> HatchError {
        if !self.filesystem.exists(staging) {
            return original;
        }

        match self.filesystem.remove_dir_all(staging) {
            Ok(()) => {
                debug!(staging = %staging.display(), "Staging directory removed");
                original
            }
            Err(e) => {
                let cleanup = ApplicationError::CleanupFailed {
                    path: staging.to_path_buf(),
                    reason: fs_reason(&e),
                };
                warn!(error = %cleanup, "Staging directory left behind");
                HatchError::CleanupAlsoFailed {
                    original: Box::new(original),
                    cleanup,
                }
            }
        }
    }
}

/// `.{name}.hatch-staging-{uuid}`, hidden and unique per call.
fn staging_dir_name(name: &ProjectName) -> String {
    let name = name.as_str();
    let mut cut = name.len().min(STAGING_NAME_PREFIX_MAX);
    while !name.is_char_boundary(cut) {
        cut -= 1;
    }
    format!(
        ".{}{}{}",
        &name[..cut],
        STAGING_MARKER,
        Uuid::new_v4().simple()
    )
}

fn fs_reason(err: &HatchError) -> String {
    match err {
        HatchError::Application(ApplicationError::FilesystemError { reason, .. }) => {
            reason.clone()
        }
        other => other.to_string(),
    }
}

fn staging_failed(path: &Path, err: &HatchError) -> HatchError {
    ApplicationError::StagingFailed {
        path: path.to_path_buf(),
        reason: fs_reason(err),
    }
    .into()
}
