//! File system access used while expanding manifest entries

use std::fs;
use std::path::{Path, PathBuf};

/// Type of a directory member
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    File,
    Directory,
    Unknown,
}

/// One-level directory listing. Dropping it releases the underlying handle.
pub type DirectoryListing<'a> = Box<dyn Iterator<Item = (String, FileType)> + 'a>;

pub trait FileSystem {
    /// Whether `path` exists as a regular file
    fn exists(&self, path: &str) -> bool;

    /// Open `path` as a directory, or `None` if it cannot be opened
    fn open_directory(&self, path: &str) -> Option<DirectoryListing<'_>>;
}

/// File system rooted at the game directory; manifest paths resolve against `root`
#[derive(Debug, Clone)]
pub struct StdFileSystem {
    root: PathBuf,
}

impl StdFileSystem {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

impl FileSystem for StdFileSystem {
    fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_file()
    }

    fn open_directory(&self, path: &str) -> Option<DirectoryListing<'_>> {
        let reader = fs::read_dir(self.resolve(path)).ok()?;

        // Sorted so the download table comes out the same on every platform
        let mut members: Vec<(String, FileType)> = reader
            .filter_map(Result::ok)
            .map(|entry| {
                let file_type = match entry.file_type() {
                    Ok(t) if t.is_file() => FileType::File,
                    Ok(t) if t.is_dir() => FileType::Directory,
                    _ => FileType::Unknown,
                };
                (entry.file_name().to_string_lossy().into_owned(), file_type)
            })
            .collect();
        members.sort_by(|a, b| a.0.cmp(&b.0));

        Some(Box::new(members.into_iter()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_exists_only_for_regular_files() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        assert!(fs::create_dir_all(temp_dir.path().join("sound/zp")).is_ok());
        assert!(fs::write(temp_dir.path().join("sound/zp/a.wav"), b"RIFF").is_ok());

        let files = StdFileSystem::new(temp_dir.path());
        assert!(files.exists("sound/zp/a.wav"));
        assert!(!files.exists("sound/zp"));
        assert!(!files.exists("sound/zp/missing.wav"));
    }

    #[test]
    fn test_open_directory_lists_one_level() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let dir = temp_dir.path().join("particles");
        assert!(fs::create_dir_all(dir.join("nested")).is_ok());
        assert!(fs::write(dir.join("fx2.pcf"), b"").is_ok());
        assert!(fs::write(dir.join("fx1.pcf"), b"").is_ok());
        assert!(fs::write(dir.join("nested/deep.pcf"), b"").is_ok());

        let files = StdFileSystem::new(temp_dir.path());
        let listing: Vec<_> = files
            .open_directory("particles/")
            .map(Iterator::collect)
            .unwrap_or_default();

        assert_eq!(
            listing,
            vec![
                ("fx1.pcf".to_string(), FileType::File),
                ("fx2.pcf".to_string(), FileType::File),
                ("nested".to_string(), FileType::Directory),
            ]
        );
    }

    #[test]
    fn test_open_missing_directory() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let files = StdFileSystem::new(temp_dir.path());
        assert!(files.open_directory("missing/").is_none());
    }
}
