use std::collections::HashSet;

use crate::domain::{entities::common::RelativePath, error::DomainError};

/// Fully resolved project content, ready to be written under a staging root.
///
/// Produced by planning a scaffold; contains no business logic, only data.
/// Entries are written in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectStructure {
    pub(crate) entries: Vec<FsEntry>,
}

impl ProjectStructure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_directory(&mut self, path: RelativePath) {
        self.entries.push(FsEntry::Directory(DirectoryToCreate { path }));
    }

    /// Add a file. A second entry at the same path is reported by
    /// [`Self::validate`], never merged.
    pub fn add_file(&mut self, path: RelativePath, content: Vec<u8>) {
        self.entries.push(FsEntry::File(FileToWrite { path, content }));
    }

    /// Replace the content of a file already planned at `path`.
    ///
    /// Returns `false` if no file is planned there.
    pub fn fill_file(&mut self, path: &RelativePath, content: Vec<u8>) -> bool {
        match self.entries.iter_mut().find_map(|e| match e {
            FsEntry::File(f) if &f.path == path => Some(f),
            _ => None,
        }) {
            Some(file) => {
                file.content = content;
                true
            }
            None => false,
        }
    }

    /// No two entries may target the same path.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        for entry in &self.entries {
            if !seen.insert(entry.path()) {
                return Err(DomainError::DuplicatePath {
                    path: entry.path().to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn entries(&self) -> &[FsEntry] {
        &self.entries
    }

    pub fn files(&self) -> impl Iterator<Item = &FileToWrite> {
        self.entries.iter().filter_map(|e| match e {
            FsEntry::File(f) => Some(f),
            _ => None,
        })
    }

    pub fn directories(&self) -> impl Iterator<Item = &DirectoryToCreate> {
        self.entries.iter().filter_map(|e| match e {
            FsEntry::Directory(d) => Some(d),
            _ => None,
        })
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsEntry {
    File(FileToWrite),
    Directory(DirectoryToCreate),
}

impl FsEntry {
    pub fn path(&self) -> &RelativePath {
        match self {
            Self::File(f) => &f.path,
            Self::Directory(d) => &d.path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileToWrite {
    pub path: RelativePath,
    pub content: Vec<u8>,
}

impl FileToWrite {
    pub fn size(&self) -> usize {
        self.content.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryToCreate {
    pub path: RelativePath,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(s: &str) -> RelativePath {
        RelativePath::try_new(s).unwrap()
    }

    #[test]
    fn fill_file_replaces_content_in_place() {
        let mut s = ProjectStructure::new();
        s.add_file(rel("project.proj"), Vec::new());
        assert!(s.fill_file(&rel("project.proj"), b"seeded".to_vec()));
        assert!(!s.fill_file(&rel("other.txt"), Vec::new()));
        assert_eq!(s.entry_count(), 1);
        assert_eq!(s.files().next().unwrap().content, b"seeded");
        assert!(s.validate().is_ok());
    }

    #[test]
    fn second_file_at_same_path_is_duplicate() {
        let mut s = ProjectStructure::new();
        s.add_file(rel("Foo.txt"), b"first".to_vec());
        s.add_file(rel("Foo.txt"), b"second".to_vec());
        assert_eq!(s.entry_count(), 2);
        assert!(matches!(
            s.validate(),
            Err(DomainError::DuplicatePath { path }) if path == "Foo.txt"
        ));
    }

    #[test]
    fn file_over_directory_is_duplicate() {
        let mut s = ProjectStructure::new();
        s.add_directory(rel("Content"));
        s.add_file(rel("Content"), Vec::new());
        assert!(matches!(s.validate(), Err(DomainError::DuplicatePath { .. })));
    }
}
