use super::DomainError;
use std::fmt;
use std::path::Path;

/// A normalized path guaranteed to stay inside the directory it is joined to.
///
/// Invariant: never absolute, never contains `..`, never empty. Separators are
/// stored as `/` regardless of platform, `.` components and empty segments
/// are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath(String);

impl RelativePath {
    /// Normalize and validate a raw path taken from a descriptor.
    pub fn try_new(raw: impl AsRef<str>) -> Result<Self, DomainError> {
        let raw = raw.as_ref();
        let unified = raw.replace('\\', "/");

        if unified.starts_with('/') {
            return Err(traversal(raw, "absolute paths are not allowed"));
        }

        let mut segments = Vec::new();
        for segment in unified.split('/') {
            match segment {
                "" | "." => continue,
                ".." => return Err(traversal(raw, "'..' components are not allowed")),
                s if segments.is_empty() && has_drive_prefix(s) => {
                    return Err(traversal(raw, "drive prefixes are not allowed"));
                }
                s if s.contains('\0') => {
                    return Err(traversal(raw, "NUL bytes are not allowed"));
                }
                s => segments.push(s),
            }
        }

        if segments.is_empty() {
            return Err(traversal(raw, "path is empty"));
        }

        Ok(Self(segments.join("/")))
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of `/`-separated components.
    pub fn depth(&self) -> usize {
        self.0.split('/').count()
    }

    /// The parent directory, if this path has more than one component.
    pub fn parent(&self) -> Option<RelativePath> {
        self.0
            .rsplit_once('/')
            .map(|(parent, _)| Self(parent.to_string()))
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        self.as_path()
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn traversal(raw: &str, reason: &'static str) -> DomainError {
    DomainError::PathTraversalRejected {
        path: raw.to_string(),
        reason,
    }
}

fn has_drive_prefix(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

const RESERVED_DEVICE_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

const FORBIDDEN_CHARS: &[char] = &['<', '>', ':', '"', '|', '?', '*'];

/// Check that `name` can be used as a single directory entry on every
/// platform the engine targets.
///
/// Returns the reason the name is rejected.
pub fn check_entry_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("name cannot be empty".into());
    }
    if name.len() > 255 {
        return Err("name is longer than 255 bytes".into());
    }
    if name == "." || name == ".." {
        return Err("name cannot be '.' or '..'".into());
    }
    if name.contains('/') || name.contains('\\') {
        return Err("name cannot contain path separators".into());
    }
    if name.chars().any(char::is_control) {
        return Err("name cannot contain control characters".into());
    }
    if let Some(c) = name.chars().find(|c| FORBIDDEN_CHARS.contains(c)) {
        return Err(format!("name cannot contain '{c}'"));
    }
    if name.ends_with(' ') || name.ends_with('.') {
        return Err("name cannot end with a space or '.'".into());
    }

    let stem = name.split('.').next().unwrap_or(name).trim_end();
    if RESERVED_DEVICE_NAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(stem))
    {
        return Err(format!("'{stem}' is a reserved device name"));
    }

    Ok(())
}
