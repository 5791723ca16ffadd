//! File-system capabilities handed to the linker pass.

use std::{
    fmt,
    path::{Component, Path, PathBuf},
};

use eyre::{Result, WrapErr};
use path_absolutize::Absolutize;

/// The file operations the linker needs to follow source maps.
pub trait LinkerFileSystem: Send + Sync + fmt::Debug {
    /// Resolve `path` to an absolute, normalized path.
    fn resolve(&self, path: &Path) -> Result<PathBuf>;

    fn exists(&self, path: &Path) -> bool;

    fn dirname(&self, path: &Path) -> PathBuf;

    /// Path of `to` relative to the directory `from`.
    fn relative(&self, from: &Path, to: &Path) -> Result<PathBuf>;

    fn read_file(&self, path: &Path) -> Result<String>;
}

/// [`LinkerFileSystem`] backed by the host file system.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostFileSystem;

impl LinkerFileSystem for HostFileSystem {
    fn resolve(&self, path: &Path) -> Result<PathBuf> {
        let resolved = path
            .absolutize()
            .wrap_err_with(|| format!("Failed to resolve path {}", path.display()))?;
        Ok(resolved.into_owned())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn dirname(&self, path: &Path) -> PathBuf {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            Some(_) => PathBuf::from("."),
            None => path.to_path_buf(),
        }
    }

    fn relative(&self, from: &Path, to: &Path) -> Result<PathBuf> {
        let from = self.resolve(from)?;
        let to = self.resolve(to)?;
        Ok(relative_path(&from, &to))
    }

    fn read_file(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read {}", path.display()))
    }
}

/// Relative path between two absolute, normalized paths.
fn relative_path(from: &Path, to: &Path) -> PathBuf {
    let from: Vec<Component<'_>> = from.components().collect();
    let to: Vec<Component<'_>> = to.components().collect();

    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..from.len() {
        relative.push("..");
    }
    for component in &to[common..] {
        relative.push(component.as_os_str());
    }
    relative
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path() {
        assert_eq!(
            relative_path(Path::new("/a/b/c"), Path::new("/a/d/e.js")),
            PathBuf::from("../../d/e.js")
        );
        assert_eq!(
            relative_path(Path::new("/a/b"), Path::new("/a/b/c.js")),
            PathBuf::from("c.js")
        );
        assert_eq!(relative_path(Path::new("/a"), Path::new("/a")), PathBuf::new());
    }

    #[test]
    fn test_dirname() {
        let fs = HostFileSystem;
        assert_eq!(fs.dirname(Path::new("/a/b.js")), PathBuf::from("/a"));
        assert_eq!(fs.dirname(Path::new("b.js")), PathBuf::from("."));
    }

    #[test]
    fn test_resolve_normalizes() {
        let fs = HostFileSystem;
        let resolved = fs.resolve(Path::new("/a/./b/../c.js")).unwrap();
        assert_eq!(resolved, PathBuf::from("/a/c.js"));
    }

    #[test]
    fn test_read_file_and_exists() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("main.js.map");
        std::fs::write(&file, "{}").unwrap();

        let fs = HostFileSystem;
        assert!(fs.exists(&file));
        assert_eq!(fs.read_file(&file).unwrap(), "{}");
        assert!(fs.read_file(&dir.path().join("missing")).is_err());
    }
}
