//! Filesystem access for path-typed fields.

use std::path::{Path, PathBuf};

/// Path resolution and existence checks used by `file-path` and
/// `directory-path` fields.
pub trait FileSystem {
    /// Turn a raw samplesheet value into a path.
    fn resolve(&self, raw: &str) -> PathBuf;

    /// Whether the resolved path exists.
    fn exists(&self, path: &Path) -> bool;
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn resolve(&self, raw: &str) -> PathBuf {
        (**self).resolve(raw)
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }
}

/// The local filesystem, with relative paths resolved against an optional
/// base directory.
#[derive(Debug, Clone, Default)]
pub struct LocalFileSystem {
    base_dir: Option<PathBuf>,
}

impl LocalFileSystem {
    pub fn new(base_dir: Option<PathBuf>) -> Self {
        Self { base_dir }
    }
}

impl FileSystem for LocalFileSystem {
    fn resolve(&self, raw: &str) -> PathBuf {
        let path = PathBuf::from(raw);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path,
        }
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_use_base_dir() {
        let fs = LocalFileSystem::new(Some(PathBuf::from("/data/run1")));
        assert_eq!(fs.resolve("reads/a.fq.gz"), PathBuf::from("/data/run1/reads/a.fq.gz"));
        assert_eq!(fs.resolve("/abs/b.fq.gz"), PathBuf::from("/abs/b.fq.gz"));
    }

    #[test]
    fn without_base_dir_paths_are_unchanged() {
        let fs = LocalFileSystem::default();
        assert_eq!(fs.resolve("reads/a.fq.gz"), PathBuf::from("reads/a.fq.gz"));
    }

    #[test]
    fn exists_checks_disk() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("present.txt");
        std::fs::write(&file, "x").unwrap();
        let fs = LocalFileSystem::default();
        assert!(fs.exists(&file));
        assert!(fs.exists(dir.path()));
        assert!(!fs.exists(&dir.path().join("absent.txt")));
    }
}
