//! Error types for the scaffold template crate.

use std::path::PathBuf;

/// Errors that can occur while loading or rendering scaffold templates.
#[derive(thiserror::Error, Debug)]
pub enum TemplateError {
    /// No template with the given name is registered or on disk.
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    /// Error occurred while rendering a template.
    #[error("template render error: {0}")]
    TemplateRenderError(String),

    /// A built-in template failed to register (invalid syntax).
    #[error("invalid built-in template: {0}")]
    InvalidBuiltinTemplate(String),

    /// Template override directory does not exist or is not a directory.
    #[error("template directory not found: {0}")]
    TemplateDirectoryNotFound(PathBuf),

    /// Template directory listing failed.
    #[error("failed to list templates in {path}")]
    TemplateListError {
        /// Path to the template directory.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;
