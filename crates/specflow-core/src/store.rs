//! On-disk spec store.
//!
//! Owns the directory layout for specs: one subdirectory per feature holding
//! a `spec.toml` manifest plus the phase documents. Every write is durable
//! before the call returns; the facade relies on that to make a document
//! write and the following phase update atomically observable.

use std::path::PathBuf;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::config::SpecflowConfig;
use crate::error::{Result, SpecError};
use crate::phase::Phase;
use crate::spec::{Spec, SpecMetadata, derive_feature_name};
use crate::tools::fs::FsAdapter;
use crate::tools::fs_impl::StdFsAdapter;

const MANIFEST_FILE: &str = "spec.toml";

/// Persisted spec manifest, stored as `spec.toml` in the spec directory.
#[derive(Debug, Serialize, Deserialize)]
struct SpecManifest {
    feature_name: String,
    description: String,
    current_phase: Phase,
    created_at: String,
    updated_at: String,
}

/// File-backed store for feature specs.
///
/// Handles creation, path resolution, and persistence. The store never
/// decides workflow transitions; it persists whatever phase the caller
/// hands to [`SpecStore::set_phase`].
pub struct SpecStore {
    specs_dir: PathBuf,
    fs: Box<dyn FsAdapter>,
}

impl SpecStore {
    /// Creates a store rooted at the configured specs directory, ensuring
    /// the directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the specs directory cannot be created.
    pub fn new(config: &SpecflowConfig) -> Result<Self> {
        Self::with_adapter(config.specs_dir.clone(), Box::new(StdFsAdapter::new()))
    }

    /// Creates a store with a custom file system adapter.
    pub fn with_adapter(specs_dir: PathBuf, fs: Box<dyn FsAdapter>) -> Result<Self> {
        fs.create_dir_all(&specs_dir)
            .context("failed to create specs directory")?;
        Ok(Self { specs_dir, fs })
    }

    /// Returns the directory path for a spec.
    pub fn spec_dir(&self, feature_name: &str) -> PathBuf {
        self.specs_dir.join(feature_name)
    }

    fn manifest_path(&self, feature_name: &str) -> PathBuf {
        self.spec_dir(feature_name).join(MANIFEST_FILE)
    }

    /// Checks whether a spec with the given feature name exists.
    pub fn exists(&self, feature_name: &str) -> bool {
        self.fs.is_dir(&self.spec_dir(feature_name))
    }

    /// Creates a new spec with phase `requirements` and no documents.
    ///
    /// The feature name is derived from `name` (see
    /// [`derive_feature_name`](crate::spec::derive_feature_name)).
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::SpecAlreadyExists`] if a spec with the derived
    /// name exists, [`SpecError::InvalidFeatureName`] if no valid name can
    /// be derived.
    pub fn create(&self, name: &str, description: &str) -> Result<Spec> {
        let feature_name = derive_feature_name(name)?;
        let spec_dir = self.spec_dir(&feature_name);

        if self.fs.exists(&spec_dir) {
            return Err(SpecError::SpecAlreadyExists(feature_name));
        }

        self.fs
            .create_dir_all(&spec_dir)
            .context("failed to create spec directory")?;

        let now = chrono::Utc::now().to_rfc3339();
        let manifest = SpecManifest {
            feature_name: feature_name.clone(),
            description: description.to_string(),
            current_phase: Phase::Requirements,
            created_at: now.clone(),
            updated_at: now,
        };

        if let Err(e) = self.write_manifest(&feature_name, &manifest) {
            // Don't leave a half-created spec directory behind.
            let _ = self.fs.remove_dir_all(&spec_dir);
            return Err(e);
        }

        tracing::info!(feature_name = %feature_name, "spec created");

        Ok(self.manifest_to_spec(manifest, spec_dir))
    }

    /// Loads a spec from its persisted manifest.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::SpecNotFound`] if the spec directory is absent,
    /// [`SpecError::CorruptedManifest`] if `spec.toml` is missing or
    /// unparseable.
    pub fn load(&self, feature_name: &str) -> Result<Spec> {
        let spec_dir = self.spec_dir(feature_name);
        if !self.fs.is_dir(&spec_dir) {
            return Err(SpecError::SpecNotFound(feature_name.to_string()));
        }

        let manifest = self.read_manifest(feature_name)?;
        Ok(self.manifest_to_spec(manifest, spec_dir))
    }

    /// Overwrites the document for a phase.
    ///
    /// Writing a document never changes the spec's phase; it only refreshes
    /// the manifest's `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::InvalidPhase`] if `phase` carries no document,
    /// [`SpecError::SpecNotFound`] if the spec does not exist.
    pub fn write_document(&self, feature_name: &str, phase: Phase, content: &str) -> Result<()> {
        let file = phase
            .document_file()
            .ok_or(SpecError::InvalidPhase(phase))?;

        let spec_dir = self.spec_dir(feature_name);
        if !self.fs.is_dir(&spec_dir) {
            return Err(SpecError::SpecNotFound(feature_name.to_string()));
        }

        self.fs.write(&spec_dir.join(file), content)?;

        let mut manifest = self.read_manifest(feature_name)?;
        manifest.updated_at = chrono::Utc::now().to_rfc3339();
        self.write_manifest(feature_name, &manifest)?;

        tracing::debug!(feature_name = %feature_name, phase = %phase, "document written");
        Ok(())
    }

    /// Reads the document for a phase.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::InvalidPhase`] if `phase` carries no document,
    /// [`SpecError::SpecNotFound`] if the spec does not exist,
    /// [`SpecError::DocumentNotFound`] if the document is not written yet.
    pub fn read_document(&self, feature_name: &str, phase: Phase) -> Result<String> {
        let file = phase
            .document_file()
            .ok_or(SpecError::InvalidPhase(phase))?;

        let spec_dir = self.spec_dir(feature_name);
        if !self.fs.is_dir(&spec_dir) {
            return Err(SpecError::SpecNotFound(feature_name.to_string()));
        }

        let path = spec_dir.join(file);
        if !self.fs.is_file(&path) {
            return Err(SpecError::DocumentNotFound {
                feature_name: feature_name.to_string(),
                phase,
            });
        }

        self.fs.read_to_string(&path)
    }

    /// Persists a new phase value for a spec.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::SpecNotFound`] if the spec does not exist.
    pub fn set_phase(&self, feature_name: &str, phase: Phase) -> Result<()> {
        if !self.exists(feature_name) {
            return Err(SpecError::SpecNotFound(feature_name.to_string()));
        }

        let mut manifest = self.read_manifest(feature_name)?;
        manifest.current_phase = phase;
        manifest.updated_at = chrono::Utc::now().to_rfc3339();
        self.write_manifest(feature_name, &manifest)?;

        tracing::info!(feature_name = %feature_name, phase = %phase, "phase persisted");
        Ok(())
    }

    /// Returns the document-bearing phases whose documents exist on disk.
    pub fn documents_present(&self, feature_name: &str) -> Result<Vec<Phase>> {
        let spec_dir = self.spec_dir(feature_name);
        if !self.fs.is_dir(&spec_dir) {
            return Err(SpecError::SpecNotFound(feature_name.to_string()));
        }

        Ok(Phase::DOCUMENT_PHASES
            .into_iter()
            .filter(|phase| {
                phase
                    .document_file()
                    .is_some_and(|file| self.fs.is_file(&spec_dir.join(file)))
            })
            .collect())
    }

    /// Lists all specs with lightweight metadata, newest first.
    ///
    /// Directories without a readable manifest are skipped with a warning
    /// rather than failing the whole listing.
    pub fn list(&self) -> Result<Vec<SpecMetadata>> {
        let mut specs = Vec::new();

        for entry in self.fs.list_dir(&self.specs_dir)? {
            if entry.starts_with('.') || !self.fs.is_dir(&self.spec_dir(&entry)) {
                continue;
            }

            let manifest = match self.read_manifest(&entry) {
                Ok(manifest) => manifest,
                Err(e) => {
                    tracing::warn!(feature_name = %entry, error = %e, "skipping unreadable spec");
                    continue;
                }
            };

            let documents = self.documents_present(&entry)?;
            specs.push(SpecMetadata {
                feature_name: manifest.feature_name,
                current_phase: manifest.current_phase,
                has_requirements: documents.contains(&Phase::Requirements),
                has_design: documents.contains(&Phase::Design),
                has_tasks: documents.contains(&Phase::Tasks),
                created_at: manifest.created_at,
                updated_at: manifest.updated_at,
            });
        }

        // RFC 3339 timestamps sort lexicographically.
        specs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(specs)
    }

    fn read_manifest(&self, feature_name: &str) -> Result<SpecManifest> {
        let path = self.manifest_path(feature_name);
        let body = match self.fs.read_to_string(&path) {
            Ok(body) => body,
            Err(SpecError::PathNotFound(_)) => {
                return Err(SpecError::CorruptedManifest(path));
            }
            Err(e) => return Err(e),
        };

        toml::from_str(&body).map_err(|_| SpecError::CorruptedManifest(path))
    }

    fn write_manifest(&self, feature_name: &str, manifest: &SpecManifest) -> Result<()> {
        let body =
            toml::to_string_pretty(manifest).context("failed to serialize spec manifest")?;
        self.fs.write(&self.manifest_path(feature_name), &body)
    }

    fn manifest_to_spec(&self, manifest: SpecManifest, base_path: PathBuf) -> Spec {
        Spec {
            feature_name: manifest.feature_name,
            description: manifest.description,
            current_phase: manifest.current_phase,
            created_at: manifest.created_at,
            updated_at: manifest.updated_at,
            base_path,
        }
    }
}

impl std::fmt::Debug for SpecStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpecStore")
            .field("specs_dir", &self.specs_dir)
            .field("fs", &"Box<dyn FsAdapter>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store(temp_dir: &TempDir) -> SpecStore {
        let config = SpecflowConfig::with_specs_dir(temp_dir.path().join("specs"));
        SpecStore::new(&config).unwrap()
    }

    #[test]
    fn test_create_initializes_requirements_phase() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        let spec = store.create("User Auth", "Login and session handling").unwrap();

        assert_eq!(spec.feature_name, "user-auth");
        assert_eq!(spec.current_phase, Phase::Requirements);
        assert_eq!(spec.description, "Login and session handling");
        assert!(store.exists("user-auth"));
        assert!(store.documents_present("user-auth").unwrap().is_empty());
    }

    #[test]
    fn test_create_duplicate_fails() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        store.create("test-feature", "first").unwrap();

        // Same derived name, different spelling of the human name.
        let result = store.create("Test Feature", "second");
        assert!(matches!(result, Err(SpecError::SpecAlreadyExists(_))));
    }

    #[test]
    fn test_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        let created = store.create("data-export", "CSV export").unwrap();
        let loaded = store.load("data-export").unwrap();

        assert_eq!(loaded, created);
    }

    #[test]
    fn test_load_missing_spec() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        let result = store.load("missing");
        assert!(matches!(result, Err(SpecError::SpecNotFound(_))));
    }

    #[test]
    fn test_write_and_read_document() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        store.create("user-auth", "").unwrap();

        store
            .write_document("user-auth", Phase::Requirements, "# Requirements")
            .unwrap();

        let content = store.read_document("user-auth", Phase::Requirements).unwrap();
        assert_eq!(content, "# Requirements");
        assert_eq!(
            store.documents_present("user-auth").unwrap(),
            vec![Phase::Requirements]
        );

        // Writing the document does not change the phase.
        assert_eq!(store.load("user-auth").unwrap().current_phase, Phase::Requirements);
    }

    #[test]
    fn test_write_document_rejects_terminal_phase() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        store.create("user-auth", "").unwrap();

        let result = store.write_document("user-auth", Phase::Complete, "x");
        assert!(matches!(result, Err(SpecError::InvalidPhase(Phase::Complete))));
    }

    #[test]
    fn test_write_document_missing_spec() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        let result = store.write_document("missing", Phase::Requirements, "x");
        assert!(matches!(result, Err(SpecError::SpecNotFound(_))));
    }

    #[test]
    fn test_read_missing_document() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        store.create("user-auth", "").unwrap();

        let result = store.read_document("user-auth", Phase::Design);
        assert!(matches!(result, Err(SpecError::DocumentNotFound { .. })));
    }

    #[test]
    fn test_set_phase_persists() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        store.create("user-auth", "").unwrap();

        store.set_phase("user-auth", Phase::Design).unwrap();

        assert_eq!(store.load("user-auth").unwrap().current_phase, Phase::Design);

        // A fresh store over the same directory sees the persisted phase.
        let config = SpecflowConfig::with_specs_dir(temp_dir.path().join("specs"));
        let reopened = SpecStore::new(&config).unwrap();
        assert_eq!(reopened.load("user-auth").unwrap().current_phase, Phase::Design);
    }

    #[test]
    fn test_set_phase_missing_spec() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        let result = store.set_phase("missing", Phase::Design);
        assert!(matches!(result, Err(SpecError::SpecNotFound(_))));
    }

    #[test]
    fn test_corrupted_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        store.create("user-auth", "").unwrap();

        std::fs::write(
            temp_dir.path().join("specs/user-auth/spec.toml"),
            "not valid toml [",
        )
        .unwrap();

        let result = store.load("user-auth");
        assert!(matches!(result, Err(SpecError::CorruptedManifest(_))));
    }

    #[test]
    fn test_list_skips_unreadable_and_sorts() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        store.create("feature-one", "").unwrap();
        store.create("feature-two", "").unwrap();
        store
            .write_document("feature-two", Phase::Requirements, "# R")
            .unwrap();

        // A stray directory without a manifest is skipped.
        std::fs::create_dir(temp_dir.path().join("specs/stray")).unwrap();

        let specs = store.list().unwrap();
        assert_eq!(specs.len(), 2);

        let two = specs.iter().find(|s| s.feature_name == "feature-two").unwrap();
        assert!(two.has_requirements);
        assert!(!two.has_design);
        assert!(!two.has_tasks);
    }

    #[test]
    fn test_list_empty_store() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        assert!(store.list().unwrap().is_empty());
    }
}
