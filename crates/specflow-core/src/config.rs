//! Configuration for the specflow runtime.
//!
//! Paths and limits used by the spec store and service. Typically built from
//! a base directory, with an environment override for the specs directory.

use std::path::PathBuf;

/// Environment variable overriding the specs directory.
pub const SPECS_DIR_ENV: &str = "SPECFLOW_SPECS_DIR";

/// Default specs directory name, relative to the base directory.
pub const DEFAULT_SPECS_DIR: &str = "specs";

/// Runtime configuration for the spec store and service.
#[derive(Debug, Clone)]
pub struct SpecflowConfig {
    /// Directory holding one subdirectory per spec.
    pub specs_dir: PathBuf,

    /// Optional directory of scaffold template overrides (`*.j2`). When
    /// `None`, the built-in templates are used.
    pub templates_dir: Option<PathBuf>,

    /// Maximum accepted document size in bytes.
    pub max_document_size: usize,
}

impl SpecflowConfig {
    /// Default maximum document size (1 MB).
    pub const DEFAULT_MAX_DOCUMENT_SIZE: usize = 1_000_000;

    /// Creates a configuration rooted at `base`, deriving `base/specs` as
    /// the specs directory.
    pub fn new(base: PathBuf) -> Self {
        Self::with_specs_dir(base.join(DEFAULT_SPECS_DIR))
    }

    /// Creates a configuration with an explicit specs directory.
    pub fn with_specs_dir(specs_dir: PathBuf) -> Self {
        Self {
            specs_dir,
            templates_dir: None,
            max_document_size: Self::DEFAULT_MAX_DOCUMENT_SIZE,
        }
    }

    /// Creates a configuration from the environment.
    ///
    /// Honors `SPECFLOW_SPECS_DIR` when set, falling back to `./specs`.
    pub fn from_env() -> Self {
        let specs_dir = std::env::var_os(SPECS_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SPECS_DIR));
        Self::with_specs_dir(specs_dir)
    }

    /// Sets the scaffold template override directory.
    #[must_use]
    pub fn with_templates_dir(mut self, dir: PathBuf) -> Self {
        self.templates_dir = Some(dir);
        self
    }

    /// Sets the maximum accepted document size in bytes.
    #[must_use]
    pub fn with_max_document_size(mut self, max: usize) -> Self {
        self.max_document_size = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_derives_specs_dir() {
        let config = SpecflowConfig::new(PathBuf::from("/work"));
        assert_eq!(config.specs_dir, PathBuf::from("/work/specs"));
        assert!(config.templates_dir.is_none());
        assert_eq!(
            config.max_document_size,
            SpecflowConfig::DEFAULT_MAX_DOCUMENT_SIZE
        );
    }

    #[test]
    fn test_builders() {
        let config = SpecflowConfig::with_specs_dir(PathBuf::from("/data/specs"))
            .with_templates_dir(PathBuf::from("/data/templates"))
            .with_max_document_size(4096);

        assert_eq!(config.specs_dir, PathBuf::from("/data/specs"));
        assert_eq!(config.templates_dir, Some(PathBuf::from("/data/templates")));
        assert_eq!(config.max_document_size, 4096);
    }
}
