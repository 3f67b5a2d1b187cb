//! Implementation of the `hatch new` command.
//!
//! Responsibility: resolve the template and location from arguments and
//! configuration, call the core scaffolder, and display results. No
//! business logic lives here.

use std::io::{self, IsTerminal};

use serde_json::json;
use tracing::{debug, info, instrument};

use hatch_adapters::LocalFilesystem;
use hatch_core::{
    application::{ProjectScaffolder, ScaffoldPlan, TemplateInfo, TemplateService},
    domain::{FsEntry, ScaffoldRequest, TemplateDescriptor, TemplateId},
};

use crate::{
    cli::NewArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `hatch new` command.
///
/// 1. Scan the template root
/// 2. Pick the template (`--template`, or a prompt on a terminal)
/// 3. Plan the project; nothing is written yet
/// 4. Stop here for `--dry-run`, otherwise confirm unless `--yes`
/// 5. Build and commit the project
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(args: NewArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let root = args.source.templates.unwrap_or(config.templates.root);
    let format = args.format.unwrap_or(config.templates.format);

    let service = super::require_templates(&root, format, &output)?;

    let template_id = match args.template {
        Some(id) => TemplateId::new(id),
        None => choose_template(&service, &output)?,
    };
    let descriptor = service.get(&template_id)?;

    let parent = args.path.unwrap_or(config.defaults.location);
    let request = ScaffoldRequest::new(args.name, parent, template_id.clone());

    let scaffolder = ProjectScaffolder::new(Box::new(LocalFilesystem::new()));
    let plan = scaffolder.plan(descriptor, &request)?;
    debug!(
        root = %plan.root().display(),
        entries = plan.structure().entry_count(),
        "Plan resolved"
    );

    if args.dry_run {
        return show_plan(&plan, &output);
    }

    if !args.yes && !output.is_quiet() && !output.is_json() && io::stdin().is_terminal() {
        show_configuration(descriptor, &plan, &output)?;
        if !confirm()? {
            return Err(CliError::Cancelled);
        }
    }

    if !output.is_json() {
        output.header(&format!("Creating '{}'...", plan.project_name()))?;
    }
    let project = scaffolder.execute(&plan)?;
    info!(root = %project.root.display(), template = %template_id, "Project created");

    if output.is_json() {
        let payload = json!({
            "template": template_id.as_str(),
            "root": project.root,
            "project_file": project.project_file,
        });
        output.data(&payload.to_string())?;
        return Ok(());
    }

    output.success(&format!("Project created at {}", project.root.display()))?;
    output.print(&format!("  Project file: {}", project.project_file.display()))?;
    output.print("")?;
    output.print("Next steps:")?;
    output.print(&format!("  cd {}", project.root.display()))?;

    Ok(())
}

// ── Template selection ────────────────────────────────────────────────────────

fn template_required(templates: &[TemplateInfo]) -> CliError {
    CliError::TemplateRequired {
        available: templates.iter().map(|t| t.id.clone()).collect(),
    }
}

#[cfg(feature = "interactive")]
fn choose_template(service: &TemplateService, output: &OutputManager) -> CliResult<TemplateId> {
    let templates = service.list();
    if output.is_json() || !io::stdin().is_terminal() {
        return Err(template_required(&templates));
    }

    let items: Vec<String> = templates
        .iter()
        .map(|t| format!("{} ({})", t.id, t.name))
        .collect();
    let choice = dialoguer::FuzzySelect::new()
        .with_prompt("Template")
        .items(&items)
        .default(0)
        .interact_opt()
        .map_err(prompt_error)?;

    choice
        .and_then(|i| templates.get(i))
        .map(|t| TemplateId::new(t.id.clone()))
        .ok_or(CliError::Cancelled)
}

#[cfg(not(feature = "interactive"))]
fn choose_template(service: &TemplateService, _output: &OutputManager) -> CliResult<TemplateId> {
    Err(template_required(&service.list()))
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn describe_entry(entry: &FsEntry) -> String {
    match entry {
        FsEntry::Directory(d) => format!("{}/", d.path),
        FsEntry::File(f) => format!("{} ({} bytes)", f.path, f.size()),
    }
}

fn show_plan(plan: &ScaffoldPlan, out: &OutputManager) -> CliResult<()> {
    let entries = plan.structure().entries();

    if out.is_json() {
        let listed: Vec<_> = entries
            .iter()
            .map(|e| match e {
                FsEntry::Directory(d) => json!({ "type": "directory", "path": d.path.as_str() }),
                FsEntry::File(f) => {
                    json!({ "type": "file", "path": f.path.as_str(), "size": f.size() })
                }
            })
            .collect();
        let payload = json!({
            "dry_run": true,
            "root": plan.root(),
            "project_file": plan.project_file_path(),
            "entries": listed,
        });
        out.data(&payload.to_string())?;
        return Ok(());
    }

    out.info(&format!("Dry run: would create {}", plan.root().display()))?;
    for entry in entries {
        out.print(&format!("  {}", describe_entry(entry)))?;
    }
    Ok(())
}

fn show_configuration(
    descriptor: &TemplateDescriptor,
    plan: &ScaffoldPlan,
    out: &OutputManager,
) -> CliResult<()> {
    out.header("Configuration")?;
    out.print(&format!("  Project:   {}", plan.project_name()))?;
    out.print(&format!(
        "  Template:  {} ({})",
        descriptor.id(),
        descriptor.display_name()
    ))?;
    out.print(&format!("  Location:  {}", plan.root().display()))?;
    out.print(&format!(
        "  Contents:  {} entries",
        plan.structure().entry_count()
    ))?;
    out.print("")?;
    Ok(())
}

#[cfg(feature = "interactive")]
fn confirm() -> CliResult<bool> {
    dialoguer::Confirm::new()
        .with_prompt("Continue?")
        .default(true)
        .interact()
        .map_err(prompt_error)
}

#[cfg(not(feature = "interactive"))]
fn confirm() -> CliResult<bool> {
    use std::io::Write;

    print!("Continue? [Y/n] ");
    io::stdout().flush().map_err(|e| CliError::IoError {
        message: "failed to flush stdout".into(),
        source: e,
    })?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: e,
        })?;

    let input = input.trim().to_ascii_lowercase();
    Ok(input.is_empty() || input == "y" || input == "yes")
}

#[cfg(feature = "interactive")]
fn prompt_error(e: dialoguer::Error) -> CliError {
    CliError::IoError {
        message: "interactive prompt failed".into(),
        source: io::Error::other(e),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
