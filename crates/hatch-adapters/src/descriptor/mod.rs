//! Descriptor parsers.
//!
//! Each parser recognizes one descriptor file name and turns its bytes into
//! a validated [`TemplateDescriptor`](hatch_core::domain::TemplateDescriptor).

mod toml;
mod xml;

use std::fmt;
use std::str::FromStr;

use hatch_core::application::ports::DescriptorParser;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use self::toml::TomlDescriptorParser;
pub use self::xml::XmlDescriptorParser;

/// Supported descriptor formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DescriptorFormat {
    /// `template.xml`
    #[default]
    Xml,
    /// `template.toml`
    Toml,
}

impl DescriptorFormat {
    /// Parser for this format.
    pub fn parser(self) -> Box<dyn DescriptorParser> {
        match self {
            Self::Xml => Box::new(XmlDescriptorParser),
            Self::Toml => Box::new(TomlDescriptorParser),
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Self::Xml => XmlDescriptorParser::FILE_NAME,
            Self::Toml => TomlDescriptorParser::FILE_NAME,
        }
    }
}

impl fmt::Display for DescriptorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Xml => write!(f, "xml"),
            Self::Toml => write!(f, "toml"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown descriptor format '{0}'; expected one of: xml, toml")]
pub struct UnknownFormat(String);

impl FromStr for DescriptorFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "xml" => Ok(Self::Xml),
            "toml" => Ok(Self::Toml),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

/// Parse a boolean flag as written in descriptors.
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
