//! `template.xml` descriptors.
//!
//! ```xml
//! <template>
//!   <name>Empty Project</name>
//!   <description>Optional text</description>
//!   <projectFile>project.doors_engine</projectFile>
//!   <folders>
//!     <folder>.DoorsEngine</folder>
//!     <folder>Content</folder>
//!   </folders>
//!   <seedFiles>
//!     <file source="seed/main.cpp" destination="Content/main.cpp" substitute="true"/>
//!   </seedFiles>
//! </template>
//! ```
//!
//! Element and attribute names match case-insensitively. Unknown elements
//! are skipped.

use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use hatch_core::{
    application::ports::DescriptorParser,
    domain::{DomainError, TemplateDescriptor, TemplateDescriptorBuilder, TemplateId},
};

use super::parse_flag;

/// Parses `template.xml` descriptors.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlDescriptorParser;

impl XmlDescriptorParser {
    pub const FILE_NAME: &'static str = "template.xml";
}

impl DescriptorParser for XmlDescriptorParser {
    fn file_name(&self) -> &'static str {
        Self::FILE_NAME
    }

    fn parse(
        &self,
        id: TemplateId,
        source_dir: &Path,
        bytes: &[u8],
    ) -> Result<TemplateDescriptor, DomainError> {
        let builder = TemplateDescriptor::builder(id).source_dir(source_dir);
        read_document(bytes, builder)?.build()
    }
}

/// Lowercased element path from the root, e.g. `["template", "folders"]`.
type ElementPath = Vec<String>;

fn read_document(
    bytes: &[u8],
    mut builder: TemplateDescriptorBuilder,
) -> Result<TemplateDescriptorBuilder, DomainError> {
    let mut reader = Reader::from_reader(bytes);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut path: ElementPath = Vec::new();
    let mut text = String::new();
    let mut seen_root = false;

    loop {
        let event = reader.read_event_into(&mut buf).map_err(|e| {
            DomainError::parse(format!(
                "invalid XML at byte {}: {e}",
                reader.buffer_position()
            ))
        })?;

        match event {
            Event::Start(e) => {
                let name = element_name(&e);
                if path.is_empty() {
                    check_root(&name, seen_root)?;
                    seen_root = true;
                } else if is_seed_file(&path, &name) {
                    builder = read_seed_file(&e, builder)?;
                }
                text.clear();
                path.push(name);
            }
            Event::Empty(e) => {
                let name = element_name(&e);
                if path.is_empty() {
                    check_root(&name, seen_root)?;
                    seen_root = true;
                } else if is_seed_file(&path, &name) {
                    builder = read_seed_file(&e, builder)?;
                } else if name == "folder" && at(&path, &["template", "folders"]) {
                    return Err(DomainError::parse("empty <folder> element"));
                }
            }
            Event::Text(e) => {
                let value = e
                    .unescape()
                    .map_err(|e| DomainError::parse(format!("invalid text: {e}")))?;
                text.push_str(&value);
            }
            Event::CData(e) => {
                text.push_str(&String::from_utf8_lossy(&e.into_inner()));
            }
            Event::End(_) => {
                let text = std::mem::take(&mut text);
                let closes_seed_file = path
                    .split_last()
                    .is_some_and(|(name, parent)| is_seed_file(parent, name));
                if !closes_seed_file {
                    builder = apply_text(&path, text, builder)?;
                }
                path.pop();
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !seen_root {
        return Err(DomainError::parse("document has no <template> element"));
    }
    if !path.is_empty() {
        return Err(DomainError::parse(format!(
            "unexpected end of document inside <{}>",
            path.join("/")
        )));
    }
    Ok(builder)
}

fn check_root(name: &str, seen_root: bool) -> Result<(), DomainError> {
    if seen_root {
        return Err(DomainError::parse("more than one root element"));
    }
    if name != "template" {
        return Err(DomainError::parse(format!(
            "root element must be <template>, found <{name}>"
        )));
    }
    Ok(())
}

fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).to_lowercase()
}

fn at(path: &[String], expected: &[&str]) -> bool {
    path.len() == expected.len() && path.iter().zip(expected).all(|(a, b)| a == b)
}

fn is_seed_file(parent: &[String], name: &str) -> bool {
    name == "file" && at(parent, &["template", "seedfiles"])
}

/// Store the text collected for the element at the end of `path`.
fn apply_text(
    path: &[String],
    text: String,
    builder: TemplateDescriptorBuilder,
) -> Result<TemplateDescriptorBuilder, DomainError> {
    let segments: Vec<&str> = path.iter().map(String::as_str).collect();
    Ok(match segments.as_slice() {
        ["template", "name"] => builder.display_name(text),
        ["template", "description"] => builder.description(text),
        ["template", "projectfile"] => builder.project_file_name(text),
        ["template", "folders", "folder"] => {
            if text.trim().is_empty() {
                return Err(DomainError::parse("empty <folder> element"));
            }
            builder.folder(text)
        }
        _ => builder,
    })
}

fn read_seed_file(
    e: &BytesStart<'_>,
    builder: TemplateDescriptorBuilder,
) -> Result<TemplateDescriptorBuilder, DomainError> {
    let mut source = None;
    let mut destination = None;
    let mut substitute = false;

    for attr in e.attributes() {
        let attr = attr.map_err(|e| DomainError::parse(format!("invalid attribute: {e}")))?;
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).to_lowercase();
        let value = attr
            .unescape_value()
            .map_err(|e| DomainError::parse(format!("invalid attribute value: {e}")))?
            .into_owned();

        match key.as_str() {
            "source" => source = Some(value),
            "destination" => destination = Some(value),
            "substitute" => {
                substitute = parse_flag(&value).ok_or_else(|| {
                    DomainError::parse(format!(
                        "substitute must be one of true, false, 1, 0, yes, no; found '{value}'"
                    ))
                })?;
            }
            _ => {}
        }
    }

    let source = source.ok_or(DomainError::MissingRequiredField {
        field: "file source",
    })?;
    let destination = destination.ok_or(DomainError::MissingRequiredField {
        field: "file destination",
    })?;
    Ok(builder.seed_file(source, destination, substitute))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Result<TemplateDescriptor, DomainError> {
        XmlDescriptorParser.parse(
            TemplateId::new("empty"),
            Path::new("/templates/empty"),
            src.as_bytes(),
        )
    }

    const EMPTY_PROJECT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<template>
  <name>Empty Project</name>
  <projectFile>project.doors_engine</projectFile>
  <folders>
    <folder>.DoorsEngine</folder>
    <folder>Content</folder>
    <folder>GameCode</folder>
  </folders>
</template>"#;

    // ── happy path ────────────────────────────────────────────────────────

    #[test]
    fn parses_empty_project() {
        let d = parse(EMPTY_PROJECT).unwrap();

        assert_eq!(d.id().as_str(), "empty");
        assert_eq!(d.display_name(), "Empty Project");
        assert_eq!(d.project_file_name(), "project.doors_engine");
        let folders: Vec<_> = d.folders().iter().map(|f| f.as_str()).collect();
        assert_eq!(folders, vec![".DoorsEngine", "Content", "GameCode"]);
        assert!(d.seed_files().is_empty());
        assert_eq!(d.description(), None);
    }

    #[test]
    fn element_names_are_case_insensitive() {
        let d = parse(
            "<Template><Name>X</Name><ProjectFile>x.proj</ProjectFile>\
             <Folders><Folder>A</Folder></Folders></Template>",
        )
        .unwrap();
        assert_eq!(d.display_name(), "X");
        assert_eq!(d.folders().len(), 1);
    }

    #[test]
    fn reads_seed_files() {
        let d = parse(
            r#"<template>
  <name>Game</name>
  <projectFile>{{PROJECT_NAME}}.proj</projectFile>
  <seedFiles>
    <file source="seed\main.cpp" destination="GameCode/main.cpp" substitute="yes"/>
    <file Source="logo.png" Destination="Content/logo.png"></file>
  </seedFiles>
</template>"#,
        )
        .unwrap();

        let seeds = d.seed_files();
        assert_eq!(seeds.len(), 2);
        assert_eq!(seeds[0].source.as_str(), "seed/main.cpp");
        assert!(seeds[0].substitute);
        assert_eq!(seeds[1].destination.as_str(), "Content/logo.png");
        assert!(!seeds[1].substitute);
        assert_eq!(
            d.seed_source_path(&seeds[0]),
            Path::new("/templates/empty/seed/main.cpp")
        );
    }

    #[test]
    fn unknown_elements_are_ignored() {
        let d = parse(
            "<template><name>X</name><icon>x.png</icon>\
             <projectFile>x.proj</projectFile><extra><folder>no</folder></extra></template>",
        )
        .unwrap();
        assert!(d.folders().is_empty());
    }

    #[test]
    fn entities_are_unescaped() {
        let d = parse(
            "<template><name>Tom &amp; Jerry</name><projectFile>x.proj</projectFile></template>",
        )
        .unwrap();
        assert_eq!(d.display_name(), "Tom & Jerry");
    }

    // ── failures ──────────────────────────────────────────────────────────

    #[test]
    fn missing_name_is_reported() {
        let err = parse("<template><projectFile>x.proj</projectFile></template>").unwrap_err();
        assert_eq!(err, DomainError::MissingRequiredField { field: "name" });
    }

    #[test]
    fn project_file_with_separator_is_invalid() {
        let err =
            parse("<template><name>X</name><projectFile>a/x.proj</projectFile></template>")
                .unwrap_err();
        assert!(matches!(err, DomainError::InvalidTemplate(_)));
    }

    #[test]
    fn truncated_document_is_a_parse_error() {
        let err = parse("<template><name>X</name>").unwrap_err();
        assert!(matches!(err, DomainError::TemplateParse { .. }));
    }

    #[test]
    fn wrong_root_is_a_parse_error() {
        let err = parse("<project><name>X</name></project>").unwrap_err();
        assert!(matches!(err, DomainError::TemplateParse { .. }));
    }

    #[test]
    fn empty_input_is_a_parse_error() {
        assert!(matches!(parse(""), Err(DomainError::TemplateParse { .. })));
    }

    #[test]
    fn bad_substitute_flag_is_a_parse_error() {
        let err = parse(
            r#"<template><name>X</name><projectFile>x.proj</projectFile>
<seedFiles><file source="a" destination="a" substitute="sometimes"/></seedFiles></template>"#,
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::TemplateParse { .. }));
    }

    #[test]
    fn seed_file_without_destination_is_reported() {
        let err = parse(
            r#"<template><name>X</name><projectFile>x.proj</projectFile>
<seedFiles><file source="a"/></seedFiles></template>"#,
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::MissingRequiredField { .. }));
    }

    #[test]
    fn escaping_destination_is_rejected() {
        let err = parse(
            r#"<template><name>X</name><projectFile>x.proj</projectFile>
<seedFiles><file source="a" destination="../../etc/passwd"/></seedFiles></template>"#,
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::PathTraversalRejected { .. }));
    }

    #[test]
    fn duplicate_folders_are_rejected() {
        let err = parse(
            "<template><name>X</name><projectFile>x.proj</projectFile>\
             <folders><folder>A</folder><folder>./A/</folder></folders></template>",
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::DuplicatePath { .. }));
    }
}
