//! Implementation of the `hatch list` command.

use tracing::instrument;

use hatch_core::application::TemplateInfo;

use crate::{
    cli::{ListArgs, ListFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(args: ListArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let root = args.source.templates.unwrap_or(config.templates.root);
    let format = args.descriptor.unwrap_or(config.templates.format);

    let service = super::scan_templates(&root, format, &output)?;
    let templates = service.list();

    // --output-format json wins over the default table layout
    let list_format = if args.format == ListFormat::Table && output.is_json() {
        ListFormat::Json
    } else {
        args.format
    };

    match list_format {
        ListFormat::Table => {
            if templates.is_empty() {
                output.info(&format!("No templates found under {}", root.display()))?;
                return Ok(());
            }
            output.header(&format!("Templates in {}:", root.display()))?;
            for line in table(&templates) {
                output.print(&line)?;
            }
        }

        ListFormat::Json => {
            let json =
                serde_json::to_string_pretty(&templates).map_err(|e| CliError::IoError {
                    message: "Failed to serialise template list".into(),
                    source: e.into(),
                })?;
            output.data(&json)?;
        }

        ListFormat::List => {
            for t in &templates {
                output.data(&t.id)?;
            }
        }

        ListFormat::Csv => {
            output.data("id,name,project_file,folders,seed_files,description")?;
            for t in &templates {
                output.data(&csv_row(t))?;
            }
        }
    }

    Ok(())
}

/// Aligned `id  name  description` rows.
fn table(templates: &[TemplateInfo]) -> Vec<String> {
    let id_width = templates.iter().map(|t| t.id.len()).max().unwrap_or(0);
    let name_width = templates.iter().map(|t| t.name.len()).max().unwrap_or(0);

    templates
        .iter()
        .map(|t| {
            let line = format!("  {:id_width$}  {:name_width$}  {}", t.id, t.name, t.description);
            line.trim_end().to_owned()
        })
        .collect()
}

fn csv_row(t: &TemplateInfo) -> String {
    [
        csv_field(&t.id),
        csv_field(&t.name),
        csv_field(&t.project_file),
        t.folders.to_string(),
        t.seed_files.to_string(),
        csv_field(&t.description),
    ]
    .join(",")
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}
