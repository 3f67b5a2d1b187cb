//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "list templates" or "scaffold a project".

pub mod scaffold_service;
pub mod template_service;

pub use scaffold_service::{ProjectScaffolder, ScaffoldPlan, ScaffoldResult};
pub use template_service::{TemplateInfo, TemplateService};
