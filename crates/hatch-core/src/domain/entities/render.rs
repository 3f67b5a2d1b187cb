//! Flat `{{TOKEN}}` substitution for seed files and paths.
//!
//! There is no control flow: a token is either a known variable and gets
//! replaced, or it is copied through verbatim.

use std::collections::HashMap;

use chrono::Datelike;

use crate::domain::entities::{descriptor::TemplateDescriptor, request::ProjectName};

/// Variables available while rendering one project.
///
/// ## Built-in Variables
///
/// | Variable | Example |
/// |----------|---------|
/// | `PROJECT_NAME` | "My Game" |
/// | `PROJECT_NAME_SNAKE` | "my_game" |
/// | `PROJECT_NAME_KEBAB` | "my-game" |
/// | `PROJECT_NAME_PASCAL` | "MyGame" |
/// | `TEMPLATE_ID` | "empty" |
/// | `TEMPLATE_NAME` | "Empty Project" |
/// | `YEAR` | "2026" |
#[derive(Debug, Clone)]
pub struct RenderContext {
    variables: HashMap<String, String>,
}

impl RenderContext {
    /// Context with only the project-name variables.
    pub fn new(project_name: &str) -> Self {
        let mut variables = HashMap::new();
        variables.insert("PROJECT_NAME".to_string(), project_name.to_string());
        variables.insert("PROJECT_NAME_SNAKE".to_string(), to_snake_case(project_name));
        variables.insert("PROJECT_NAME_KEBAB".to_string(), to_kebab_case(project_name));
        variables.insert("PROJECT_NAME_PASCAL".to_string(), to_pascal_case(project_name));
        Self { variables }
    }

    /// Full context for scaffolding `descriptor` as `project_name`.
    pub fn for_project(project_name: &ProjectName, descriptor: &TemplateDescriptor) -> Self {
        Self::new(project_name.as_str())
            .with_variable("TEMPLATE_ID", descriptor.id().as_str())
            .with_variable("TEMPLATE_NAME", descriptor.display_name())
            .with_variable("YEAR", chrono::Utc::now().year().to_string())
    }

    /// Add or override a variable.
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Replace every `{{KEY}}` whose trimmed key is known.
    ///
    /// Substituted values are not scanned again, so a project name that
    /// itself looks like a token is inserted literally.
    pub fn render(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        let mut rest = input;

        while let Some(open) = rest.find("{{") {
            out.push_str(&rest[..open]);
            let after_open = &rest[open + 2..];

            let Some(close) = after_open.find("}}") else {
                out.push_str(&rest[open..]);
                return out;
            };

            let key = after_open[..close].trim();
            match self.get(key) {
                Some(value) => out.push_str(value),
                None => out.push_str(&rest[open..open + 2 + close + 2]),
            }
            rest = &after_open[close + 2..];
        }

        out.push_str(rest);
        out
    }
}

// ============================================================================
// Case conversion
// ============================================================================

fn to_snake_case(s: &str) -> String {
    split_words(s).join("_")
}

fn to_kebab_case(s: &str) -> String {
    split_words(s).join("-")
}

fn to_pascal_case(s: &str) -> String {
    split_words(s)
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            chars
                .next()
                .map(|first| first.to_uppercase().chain(chars).collect::<String>())
                .unwrap_or_default()
        })
        .collect()
}

/// Lowercased words of an identifier-ish string.
///
/// Splits on `_`, `-`, `.`, whitespace, lower→upper transitions (`myGame`)
/// and the end of an acronym (`HTTPServer` → `http`, `server`).
fn split_words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' || c == '.' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        let prev = i.checked_sub(1).map(|p| chars[p]);
        let next = chars.get(i + 1).copied();
        let boundary = match prev {
            Some(p) if c.is_uppercase() => {
                p.is_lowercase()
                    || p.is_ascii_digit()
                    || (p.is_uppercase() && next.is_some_and(char::is_lowercase))
            }
            _ => false,
        };
        if boundary && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }

        current.extend(c.to_lowercase());
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_known_tokens() {
        let ctx = RenderContext::new("MyGame");
        assert_eq!(
            ctx.render("name={{PROJECT_NAME}} mod={{ PROJECT_NAME_SNAKE }}"),
            "name=MyGame mod=my_game"
        );
    }

    #[test]
    fn unknown_tokens_left_verbatim() {
        let ctx = RenderContext::new("Foo");
        assert_eq!(ctx.render("{{UNKNOWN}} {{PROJECT_NAME}}"), "{{UNKNOWN}} Foo");
    }

    #[test]
    fn unterminated_token_left_verbatim() {
        let ctx = RenderContext::new("Foo");
        assert_eq!(ctx.render("a {{PROJECT_NAME"), "a {{PROJECT_NAME");
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        let ctx = RenderContext::new("{{YEAR}}").with_variable("YEAR", "2026");
        assert_eq!(ctx.render("{{PROJECT_NAME}}"), "{{YEAR}}");
    }

    #[test]
    fn repeated_and_adjacent_tokens() {
        let ctx = RenderContext::new("A");
        assert_eq!(ctx.render("{{PROJECT_NAME}}{{PROJECT_NAME}}"), "AA");
        // the key is "{PROJECT_NAME", which is unknown
        assert_eq!(ctx.render("{{{PROJECT_NAME}}}"), "{{{PROJECT_NAME}}}");
    }

    #[test]
    fn case_variants() {
        let ctx = RenderContext::new("My Awesome-Game");
        assert_eq!(ctx.get("PROJECT_NAME_SNAKE"), Some("my_awesome_game"));
        assert_eq!(ctx.get("PROJECT_NAME_KEBAB"), Some("my-awesome-game"));
        assert_eq!(ctx.get("PROJECT_NAME_PASCAL"), Some("MyAwesomeGame"));
    }

    #[test]
    fn acronym_boundaries() {
        assert_eq!(to_snake_case("HTTPServer"), "http_server");
        assert_eq!(to_snake_case("myGame2D"), "my_game2_d");
        assert_eq!(to_pascal_case("doors_engine"), "DoorsEngine");
    }

    #[test]
    fn project_context_has_template_variables() {
        let descriptor = TemplateDescriptor::builder("empty")
            .display_name("Empty Project")
            .project_file_name("p.proj")
            .build()
            .unwrap();
        let name = ProjectName::parse("Foo").unwrap();
        let ctx = RenderContext::for_project(&name, &descriptor);
        assert_eq!(ctx.get("TEMPLATE_ID"), Some("empty"));
        assert_eq!(ctx.get("TEMPLATE_NAME"), Some("Empty Project"));
        assert!(ctx.get("YEAR").is_some_and(|y| y.len() == 4));
    }
}
