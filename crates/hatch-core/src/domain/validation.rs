use crate::domain::{
    entities::{ProjectName, ProjectStructure, RelativePath, TemplateDescriptor, TemplateId},
    error::DomainError,
};

/// Centralized domain validation.
///
/// Descriptor invariants are enforced when a descriptor is built; this is
/// where the checks that depend on user input live.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_project_name(name: &str) -> Result<ProjectName, DomainError> {
        ProjectName::parse(name)
    }

    /// Re-check a path after token substitution.
    pub fn validate_rendered_path(rendered: &str) -> Result<RelativePath, DomainError> {
        RelativePath::try_new(rendered)
    }

    /// The rendered project file name must still be a single entry.
    pub fn validate_rendered_project_file(rendered: &str) -> Result<RelativePath, DomainError> {
        let path = RelativePath::try_new(rendered)?;
        if path.depth() != 1 {
            return Err(DomainError::PathTraversalRejected {
                path: rendered.to_string(),
                reason: "project file must be created at the project root",
            });
        }
        Ok(path)
    }

    pub fn validate_template_id(descriptor: &TemplateDescriptor, requested: &TemplateId) -> bool {
        descriptor.id() == requested
    }

    pub fn validate_project_structure(structure: &ProjectStructure) -> Result<(), DomainError> {
        structure.validate()
    }
}
