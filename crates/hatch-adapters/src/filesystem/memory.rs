//! In-memory filesystem adapter for testing.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use hatch_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{HatchError, HatchResult},
};

/// In-memory filesystem for testing.
///
/// Paths are taken literally; relative paths are made absolute against `/`.
/// Clones share the same storage.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, Vec<u8>>,
    directories: HashSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.directories.contains(path)
    }

    fn parent_exists(&self, path: &Path) -> bool {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && parent != Path::new("/") => {
                self.directories.contains(parent)
            }
            _ => true,
        }
    }

    fn mkdir_p(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Place a file, creating its parents (testing helper).
    pub fn seed_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        if let Ok(mut inner) = self.inner.write() {
            let path = path.as_ref();
            if let Some(parent) = path.parent() {
                inner.mkdir_p(parent);
            }
            inner.files.insert(path.to_path_buf(), content.into());
        }
    }

    /// A file's content, if present (testing helper).
    pub fn contents(&self, path: &Path) -> Option<Vec<u8>> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = self
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default();
        files.sort();
        files
    }

    /// Direct children of `dir`, sorted by name.
    pub fn list_dir(&self, dir: &Path) -> Vec<PathBuf> {
        let Ok(inner) = self.read() else {
            return Vec::new();
        };
        let mut children: Vec<_> = inner
            .files
            .keys()
            .chain(inner.directories.iter())
            .filter(|p| p.parent() == Some(dir))
            .cloned()
            .collect();
        children.sort();
        children
    }

    fn read(&self) -> HatchResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner.read().map_err(|_| poisoned())
    }

    fn write(&self) -> HatchResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner.write().map_err(|_| poisoned())
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.read().map(|inner| inner.exists(path)).unwrap_or(false)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.read()
            .map(|inner| inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn create_dir(&self, path: &Path) -> HatchResult<()> {
        let mut inner = self.write()?;
        if inner.exists(path) {
            return Err(fs_error(path, "already exists"));
        }
        if !inner.parent_exists(path) {
            return Err(fs_error(path, "parent directory does not exist"));
        }
        inner.directories.insert(path.to_path_buf());
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> HatchResult<()> {
        let mut inner = self.write()?;
        if inner.files.contains_key(path) {
            return Err(fs_error(path, "a file is in the way"));
        }
        inner.mkdir_p(path);
        Ok(())
    }

    fn read_file(&self, path: &Path) -> HatchResult<Vec<u8>> {
        self.read()?
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| fs_error(path, "no such file"))
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> HatchResult<()> {
        let mut inner = self.write()?;
        if !inner.parent_exists(path) {
            return Err(fs_error(path, "parent directory does not exist"));
        }
        if inner.directories.contains(path) {
            return Err(fs_error(path, "is a directory"));
        }
        inner.files.insert(path.to_path_buf(), content.to_vec());
        Ok(())
    }

    fn rename_no_replace(&self, from: &Path, to: &Path) -> HatchResult<()> {
        let mut inner = self.write()?;
        if !inner.exists(from) {
            return Err(fs_error(from, "no such file or directory"));
        }
        if inner.exists(to) {
            return Err(fs_error(to, "already exists"));
        }

        let moved = |p: &Path| p.strip_prefix(from).map(|rest| to.join(rest)).ok();

        let directories: Vec<_> = inner.directories.iter().cloned().collect();
        for dir in directories {
            if let Some(target) = moved(&dir) {
                inner.directories.remove(&dir);
                inner.directories.insert(target);
            }
        }

        let files: Vec<_> = inner
            .files
            .keys()
            .filter(|p| p.starts_with(from))
            .cloned()
            .collect();
        for file in files {
            if let (Some(target), Some(content)) = (moved(&file), inner.files.remove(&file)) {
                inner.files.insert(target, content);
            }
        }
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> HatchResult<()> {
        let mut inner = self.write()?;
        if !inner.directories.contains(path) {
            return Err(fs_error(path, "no such directory"));
        }
        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));
        Ok(())
    }

    fn absolute(&self, path: &Path) -> HatchResult<PathBuf> {
        Ok(Path::new("/").join(path))
    }
}

fn fs_error(path: &Path, reason: &str) -> HatchError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
    .into()
}

fn poisoned() -> HatchError {
    HatchError::Internal {
        message: "memory filesystem lock poisoned".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_requires_parent() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("/a/b.txt"), b"x").is_err());

        fs.create_dir_all(Path::new("/a")).unwrap();
        fs.write_file(Path::new("/a/b.txt"), b"x").unwrap();
        assert_eq!(fs.contents(Path::new("/a/b.txt")), Some(b"x".to_vec()));
    }

    #[test]
    fn rename_moves_the_whole_subtree() {
        let fs = MemoryFilesystem::new();
        fs.seed_file("/ws/.stage/Content/readme.md", "hi");
        fs.seed_file("/ws/.stage/p.proj", "");

        fs.rename_no_replace(Path::new("/ws/.stage"), Path::new("/ws/Foo"))
            .unwrap();

        assert!(fs.is_dir(Path::new("/ws/Foo/Content")));
        assert_eq!(
            fs.list_files(),
            vec![
                PathBuf::from("/ws/Foo/Content/readme.md"),
                PathBuf::from("/ws/Foo/p.proj"),
            ]
        );
        assert!(!fs.exists(Path::new("/ws/.stage")));
    }

    #[test]
    fn rename_never_replaces() {
        let fs = MemoryFilesystem::new();
        fs.seed_file("/ws/.stage/p.proj", "");
        fs.create_dir_all(Path::new("/ws/Foo")).unwrap();

        assert!(
            fs.rename_no_replace(Path::new("/ws/.stage"), Path::new("/ws/Foo"))
                .is_err()
        );
        assert!(fs.exists(Path::new("/ws/.stage/p.proj")));
    }

    #[test]
    fn remove_dir_all_drops_descendants_only() {
        let fs = MemoryFilesystem::new();
        fs.seed_file("/ws/a/x", "1");
        fs.seed_file("/ws/ab/y", "2");

        fs.remove_dir_all(Path::new("/ws/a")).unwrap();

        assert_eq!(fs.list_files(), vec![PathBuf::from("/ws/ab/y")]);
        assert_eq!(fs.list_dir(Path::new("/ws")), vec![PathBuf::from("/ws/ab")]);
    }

    #[test]
    fn clones_share_storage() {
        let fs = MemoryFilesystem::new();
        let other = fs.clone();
        other.seed_file("/f", "x");
        assert!(fs.exists(Path::new("/f")));
    }
}
