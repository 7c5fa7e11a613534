//! File system adapter trait.
//!
//! Defines the storage interface the spec store needs: byte-durable
//! key-to-text access addressed by path, with `read`, `write`, `exists`,
//! and `list` operations.

use std::path::Path;

use crate::error::Result;

/// File system adapter for spec storage.
///
/// Implementations must make every `write` durable before returning; the
/// facade treats a successful document write plus phase update as atomically
/// observable, so no buffering across calls is allowed.
pub trait FsAdapter: Send + Sync {
    /// Reads the contents of a file as a string.
    ///
    /// # Errors
    ///
    /// Returns `SpecError::PathNotFound` if the file doesn't exist,
    /// `SpecError::FileReadError` if reading fails.
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Writes a string to a file, replacing any previous content.
    ///
    /// The write is scoped: the implementation acquires the underlying
    /// storage resource, flushes, and releases it on all exit paths, so a
    /// crash mid-write cannot leave a corrupt file at `path`. Parent
    /// directories are created as needed.
    ///
    /// # Errors
    ///
    /// Returns `SpecError::FileWriteError` if writing fails,
    /// `SpecError::PermissionDenied` if lacking write permissions.
    fn write(&self, path: &Path, content: &str) -> Result<()>;

    /// Lists all entry names in a directory (not full paths).
    ///
    /// # Errors
    ///
    /// Returns `SpecError::PathNotFound` if the directory doesn't exist,
    /// `SpecError::FileReadError` if listing fails.
    fn list_dir(&self, path: &Path) -> Result<Vec<String>>;

    /// Checks if a path exists (file or directory).
    fn exists(&self, path: &Path) -> bool;

    /// Creates a directory and all missing parent directories.
    ///
    /// # Errors
    ///
    /// Returns `SpecError::FileWriteError` if creation fails,
    /// `SpecError::PermissionDenied` if lacking write permissions.
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Removes a directory and all of its contents.
    ///
    /// # Errors
    ///
    /// Returns `SpecError::PathNotFound` if the directory doesn't exist,
    /// `SpecError::FileWriteError` if removal fails.
    fn remove_dir_all(&self, path: &Path) -> Result<()>;

    /// Checks if a path is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Checks if a path is a file.
    fn is_file(&self, path: &Path) -> bool;
}
