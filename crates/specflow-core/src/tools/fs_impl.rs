//! Standard file system adapter implementation.
//!
//! Provides the `FsAdapter` implementation used in production. Writes go
//! through a sibling temp file that is synced and renamed into place, so a
//! partially written document never becomes visible under its final name.

use std::fs::File;
use std::io::Write as _;
use std::path::Path;

use crate::error::{Result, SpecError};
use crate::tools::fs::FsAdapter;

/// Standard file system adapter using `std::fs`.
#[derive(Debug, Default)]
pub struct StdFsAdapter;

impl StdFsAdapter {
    /// Creates a new standard file system adapter.
    pub fn new() -> Self {
        Self
    }
}

fn write_error(path: &Path, e: std::io::Error) -> SpecError {
    if e.kind() == std::io::ErrorKind::PermissionDenied {
        SpecError::PermissionDenied(path.display().to_string())
    } else {
        SpecError::FileWriteError(format!("{}: {}", path.display(), e))
    }
}

impl FsAdapter for StdFsAdapter {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SpecError::PathNotFound(path.to_path_buf())
            } else {
                SpecError::FileReadError(format!("{}: {}", path.display(), e))
            }
        })
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
        if let Some(dir) = parent
            && !dir.exists()
        {
            self.create_dir_all(dir)?;
        }

        // Write to a sibling temp file, sync, then rename over the target.
        // The rename makes the new content visible all-or-nothing.
        let file_name = path
            .file_name()
            .ok_or_else(|| SpecError::FileWriteError(format!("{}: not a file path", path.display())))?;
        let mut tmp_name = file_name.to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = path.with_file_name(tmp_name);

        let result = File::create(&tmp_path)
            .and_then(|mut file| {
                file.write_all(content.as_bytes())?;
                file.sync_all()
            })
            .and_then(|_| std::fs::rename(&tmp_path, path));

        if let Err(e) = result {
            // Best effort: don't leave the temp file behind on failure.
            let _ = std::fs::remove_file(&tmp_path);
            return Err(write_error(path, e));
        }

        Ok(())
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<String>> {
        if !path.exists() {
            return Err(SpecError::PathNotFound(path.to_path_buf()));
        }

        std::fs::read_dir(path)
            .map_err(|e| SpecError::FileReadError(format!("{}: {}", path.display(), e)))?
            .map(|entry| {
                entry
                    .map(|e| e.file_name().to_string_lossy().to_string())
                    .map_err(|e| {
                        SpecError::FileReadError(format!("failed to read directory entry: {}", e))
                    })
            })
            .collect()
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path).map_err(|e| write_error(path, e))
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(SpecError::PathNotFound(path.to_path_buf()));
        }
        std::fs::remove_dir_all(path).map_err(|e| write_error(path, e))
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_write() {
        let temp_dir = TempDir::new().unwrap();
        let adapter = StdFsAdapter::new();
        let file_path = temp_dir.path().join("requirements.md");

        adapter.write(&file_path, "# Requirements").unwrap();

        let content = adapter.read_to_string(&file_path).unwrap();
        assert_eq!(content, "# Requirements");
    }

    #[test]
    fn test_write_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let adapter = StdFsAdapter::new();
        let file_path = temp_dir.path().join("design.md");

        adapter.write(&file_path, "first").unwrap();
        adapter.write(&file_path, "second").unwrap();

        assert_eq!(adapter.read_to_string(&file_path).unwrap(), "second");
    }

    #[test]
    fn test_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let adapter = StdFsAdapter::new();

        adapter
            .write(&temp_dir.path().join("tasks.md"), "# Tasks")
            .unwrap();

        let entries = adapter.list_dir(temp_dir.path()).unwrap();
        assert_eq!(entries, vec!["tasks.md".to_string()]);
    }

    #[test]
    fn test_read_nonexistent() {
        let adapter = StdFsAdapter::new();
        let result = adapter.read_to_string(Path::new("/nonexistent/file.md"));

        assert!(matches!(result, Err(SpecError::PathNotFound(_))));
    }

    #[test]
    fn test_create_and_remove_dir() {
        let temp_dir = TempDir::new().unwrap();
        let adapter = StdFsAdapter::new();
        let nested = temp_dir.path().join("specs").join("user-auth");

        adapter.create_dir_all(&nested).unwrap();
        assert!(adapter.is_dir(&nested));

        adapter.remove_dir_all(&nested).unwrap();
        assert!(!adapter.exists(&nested));

        assert!(matches!(
            adapter.remove_dir_all(&nested),
            Err(SpecError::PathNotFound(_))
        ));
    }

    #[test]
    fn test_list_dir() {
        let temp_dir = TempDir::new().unwrap();
        let adapter = StdFsAdapter::new();

        adapter
            .write(&temp_dir.path().join("requirements.md"), "r")
            .unwrap();
        adapter.write(&temp_dir.path().join("design.md"), "d").unwrap();

        let mut entries = adapter.list_dir(temp_dir.path()).unwrap();
        entries.sort();
        assert_eq!(entries, vec!["design.md".to_string(), "requirements.md".to_string()]);
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let adapter = StdFsAdapter::new();
        let file_path = temp_dir.path().join("specs").join("user-auth").join("spec.toml");

        adapter.write(&file_path, "feature_name = \"user-auth\"").unwrap();

        assert!(adapter.is_file(&file_path));
    }
}
