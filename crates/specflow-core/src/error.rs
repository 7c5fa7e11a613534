//! Error types for specflow operations.
//!
//! This module defines all error variants that can occur during spec
//! lifecycle and workflow operations. All errors use `thiserror` for
//! ergonomic error handling with context, and every variant is recoverable
//! by the caller: no error is fatal to the process.

use std::path::PathBuf;

use thiserror::Error;

use crate::phase::Phase;

/// Error types for spec store, workflow, and facade operations.
///
/// Domain errors (spec/document/workflow) are distinct from storage-layer
/// I/O failures, which surface as the storage variants below and are never
/// reinterpreted as domain errors.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SpecError {
    // Spec lifecycle errors
    /// A spec with the derived feature name already exists.
    #[error("spec already exists: {0}")]
    SpecAlreadyExists(String),

    /// No spec with the given feature name was found.
    #[error("spec not found: {0}")]
    SpecNotFound(String),

    /// Feature name cannot be derived into a valid kebab-case slug.
    #[error("invalid feature name: {0}")]
    InvalidFeatureName(String),

    // Document errors
    /// The phase carries no document (only requirements, design, and tasks do).
    #[error("phase '{0}' does not carry a document")]
    InvalidPhase(Phase),

    /// Requested document phase does not match the spec's current phase.
    #[error("document phase '{requested}' does not match current phase '{current}'")]
    PhaseMismatch {
        /// The spec's current workflow phase.
        current: Phase,
        /// The phase the caller tried to write.
        requested: Phase,
    },

    /// The document for the given phase has not been written yet.
    #[error("document '{phase}' not found for spec '{feature_name}'")]
    DocumentNotFound {
        /// Feature name of the spec.
        feature_name: String,
        /// Phase whose document is missing.
        phase: Phase,
    },

    /// Document content exceeds the configured size limit.
    #[error("document too large: {size} bytes (max {max})")]
    DocumentTooLarge {
        /// Size of the rejected content in bytes.
        size: usize,
        /// Configured maximum in bytes.
        max: usize,
    },

    // Workflow errors
    /// Advancement was requested on a spec already in the terminal phase.
    #[error("spec '{0}' is complete: no further phase transitions")]
    TerminalPhase(String),

    // Manifest errors
    /// The `spec.toml` manifest exists but cannot be parsed.
    #[error("corrupted spec manifest: {0}")]
    CorruptedManifest(PathBuf),

    // Storage errors
    /// Path not found in the file system.
    #[error("path not found: {0}")]
    PathNotFound(PathBuf),

    /// Error reading a file.
    #[error("file read error: {0}")]
    FileReadError(String),

    /// Error writing a file.
    #[error("file write error: {0}")]
    FileWriteError(String),

    /// Permission denied for the specified path.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Standard IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    // Template errors
    /// Scaffold template rendering failed.
    #[error(transparent)]
    Template(#[from] specflow_templates::TemplateError),

    // Anyhow passthrough for rich context
    /// Generic error with context from anyhow.
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for specflow operations.
///
/// All fallible operations return this type, using [`SpecError`] for error variants.
pub type Result<T> = std::result::Result<T, SpecError>;
