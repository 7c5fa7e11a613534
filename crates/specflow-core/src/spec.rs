//! Spec data model and feature-name derivation.
//!
//! A spec is the unit of tracked work: up to three phase documents plus a
//! current workflow phase, stored in a directory named after the feature.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::{Result, SpecError};
use crate::phase::Phase;

const MIN_FEATURE_NAME_LEN: usize = 3;
const MAX_FEATURE_NAME_LEN: usize = 50;

/// A feature specification.
///
/// Reconstructed from the on-disk `spec.toml` manifest plus the documents
/// present in the spec directory. The `feature_name` is the stable
/// identifier; `description` is immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spec {
    /// Kebab-case identifier for the feature, stable once created.
    pub feature_name: String,

    /// Free-text description supplied at creation.
    pub description: String,

    /// Current workflow phase. Only ever advances forward.
    pub current_phase: Phase,

    /// RFC 3339 timestamp of spec creation.
    pub created_at: String,

    /// RFC 3339 timestamp of the last mutation.
    pub updated_at: String,

    /// File system path to the spec directory.
    pub base_path: PathBuf,
}

impl Spec {
    /// Returns the path of the document for `phase`, or `None` for the
    /// terminal phase which carries no document.
    pub fn document_path(&self, phase: Phase) -> Option<PathBuf> {
        phase.document_file().map(|file| self.base_path.join(file))
    }
}

/// Lightweight projection for listing specs without loading documents.
#[derive(Debug, Clone, Serialize)]
pub struct SpecMetadata {
    /// Kebab-case identifier for the feature.
    pub feature_name: String,

    /// Current workflow phase.
    pub current_phase: Phase,

    /// Whether requirements.md exists.
    pub has_requirements: bool,

    /// Whether design.md exists.
    pub has_design: bool,

    /// Whether tasks.md exists.
    pub has_tasks: bool,

    /// RFC 3339 timestamp of spec creation.
    pub created_at: String,

    /// RFC 3339 timestamp of the last mutation.
    pub updated_at: String,
}

/// Derives a kebab-case feature name from a human-supplied name.
///
/// Lowercases the input, maps whitespace and underscores to hyphens, strips
/// everything else that is not alphanumeric, and collapses hyphen runs. The
/// result must start with a letter and be between 3 and 50 characters.
///
/// # Errors
///
/// Returns [`SpecError::InvalidFeatureName`] if no valid slug can be derived.
///
/// # Examples
///
/// ```
/// use specflow_core::spec::derive_feature_name;
///
/// assert_eq!(derive_feature_name("User Auth").unwrap(), "user-auth");
/// assert_eq!(derive_feature_name("data_export").unwrap(), "data-export");
/// assert!(derive_feature_name("!!").is_err());
/// ```
pub fn derive_feature_name(name: &str) -> Result<String> {
    let mut slug = String::with_capacity(name.len());
    for c in name.trim().to_lowercase().chars() {
        match c {
            'a'..='z' | '0'..='9' => slug.push(c),
            ' ' | '\t' | '_' | '-' => {
                if !slug.ends_with('-') {
                    slug.push('-');
                }
            }
            _ => {}
        }
    }
    let slug = slug.trim_matches('-').to_string();

    if slug.len() < MIN_FEATURE_NAME_LEN || slug.len() > MAX_FEATURE_NAME_LEN {
        return Err(SpecError::InvalidFeatureName(format!(
            "{} (must be {}-{} characters after slugification)",
            name, MIN_FEATURE_NAME_LEN, MAX_FEATURE_NAME_LEN
        )));
    }

    if !slug.chars().next().is_some_and(|c| c.is_ascii_lowercase()) {
        return Err(SpecError::InvalidFeatureName(format!(
            "{} (must start with a letter)",
            name
        )));
    }

    Ok(slug)
}
