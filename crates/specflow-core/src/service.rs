//! Spec service facade.
//!
//! The externally callable operation set: create a spec, update a phase
//! document with an explicit approval flag, and query status. Composes the
//! [`SpecStore`] and [`WorkflowEngine`] into atomic request/response
//! operations. The service is an explicitly constructed instance; whatever
//! transport exposes it (CLI, RPC adapter) receives it by value or
//! reference, never through a process-wide singleton.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use specflow_templates::{ScaffoldContext, TemplateEngine, TemplateManager};

use crate::config::SpecflowConfig;
use crate::error::{Result, SpecError};
use crate::phase::Phase;
use crate::spec::SpecMetadata;
use crate::store::SpecStore;
use crate::workflow::WorkflowEngine;

/// Payload returned by [`SpecService::create_spec`].
#[derive(Debug, Clone, Serialize)]
pub struct CreatedSpec {
    /// Derived kebab-case identifier.
    pub feature_name: String,

    /// Initial phase, always `requirements`.
    pub current_phase: Phase,
}

/// Payload returned by [`SpecService::update_spec_document`].
#[derive(Debug, Clone, Serialize)]
pub struct UpdateOutcome {
    /// Phase after the update (advanced iff approval was given).
    pub current_phase: Phase,

    /// Whether this call advanced the phase.
    pub advanced: bool,

    /// `true` whenever the spec is non-terminal and this call did not
    /// advance it: the caller must supply approval to proceed.
    pub requires_approval: bool,
}

/// Payload returned by [`SpecService::get_status`].
#[derive(Debug, Clone, Serialize)]
pub struct SpecStatus {
    /// Kebab-case identifier.
    pub feature_name: String,

    /// Current workflow phase.
    pub current_phase: Phase,

    /// Document-bearing phases whose documents exist on disk.
    pub documents: Vec<Phase>,

    /// Whether advancement still needs caller approval.
    pub requires_approval: bool,
}

/// Facade over the spec store and workflow engine.
///
/// Calls are synchronous request/response; mutation of a single spec is
/// serialized through a per-feature-name lock held for the duration of
/// [`SpecService::update_spec_document`], so document persistence and phase
/// persistence are always observed together.
pub struct SpecService {
    store: SpecStore,
    templates: TemplateManager,
    max_document_size: usize,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl SpecService {
    /// Creates a service from configuration.
    ///
    /// Uses the built-in scaffold templates unless the configuration names
    /// an override directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the specs directory cannot be created or the
    /// template override directory cannot be loaded.
    pub fn new(config: &SpecflowConfig) -> Result<Self> {
        let store = SpecStore::new(config)?;
        let templates = match &config.templates_dir {
            Some(dir) => TemplateManager::from_dir(dir.clone())?,
            None => TemplateManager::builtin()?,
        };

        Ok(Self {
            store,
            templates,
            max_document_size: config.max_document_size,
            locks: Mutex::new(HashMap::new()),
        })
    }

    /// Creates a new feature spec.
    ///
    /// The spec starts in the `requirements` phase with no documents
    /// written. The description is immutable afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::SpecAlreadyExists`] if a spec with the derived
    /// feature name exists, [`SpecError::InvalidFeatureName`] for names that
    /// cannot be slugified.
    #[tracing::instrument(skip(self, description))]
    pub fn create_spec(&self, name: &str, description: &str) -> Result<CreatedSpec> {
        let spec = self.store.create(name, description)?;
        Ok(CreatedSpec {
            feature_name: spec.feature_name,
            current_phase: spec.current_phase,
        })
    }

    /// Updates the document for the spec's current phase, advancing the
    /// phase iff `phase_approval` is `true`.
    ///
    /// The document write is durable before the advancement decision runs;
    /// document content and phase are independently valid states, so a
    /// rejected advance leaves the written document behind but never a
    /// half-applied phase.
    ///
    /// Out-of-turn writes are rejected: `phase` must equal the spec's
    /// current phase. Once a spec is `complete` every write is out of turn,
    /// which keeps the terminal state immutable.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::InvalidPhase`] if `phase` carries no document,
    /// [`SpecError::DocumentTooLarge`] past the configured size limit,
    /// [`SpecError::SpecNotFound`] for unknown specs, and
    /// [`SpecError::PhaseMismatch`] for out-of-turn writes.
    #[tracing::instrument(skip(self, content), fields(phase = %phase, approval = phase_approval))]
    pub fn update_spec_document(
        &self,
        feature_name: &str,
        phase: Phase,
        content: &str,
        phase_approval: bool,
    ) -> Result<UpdateOutcome> {
        if phase.document_file().is_none() {
            return Err(SpecError::InvalidPhase(phase));
        }

        if content.len() > self.max_document_size {
            return Err(SpecError::DocumentTooLarge {
                size: content.len(),
                max: self.max_document_size,
            });
        }

        let lock = self.spec_lock(feature_name);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let spec = self.store.load(feature_name)?;

        if phase != spec.current_phase {
            return Err(SpecError::PhaseMismatch {
                current: spec.current_phase,
                requested: phase,
            });
        }

        self.store.write_document(feature_name, phase, content)?;

        let decision = WorkflowEngine::decide(&spec, phase_approval)?;
        if decision.advanced {
            self.store.set_phase(feature_name, decision.new_phase)?;
            tracing::info!(
                feature_name = %feature_name,
                from = %spec.current_phase,
                to = %decision.new_phase,
                "phase advanced"
            );
        }

        Ok(UpdateOutcome {
            current_phase: decision.new_phase,
            advanced: decision.advanced,
            requires_approval: decision.requires_approval,
        })
    }

    /// Read-only projection of a spec's phase and written documents.
    ///
    /// Idempotent: repeated calls without intervening writes return
    /// identical payloads.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::SpecNotFound`] for unknown specs.
    #[tracing::instrument(skip(self))]
    pub fn get_status(&self, feature_name: &str) -> Result<SpecStatus> {
        let spec = self.store.load(feature_name)?;
        let documents = self.store.documents_present(feature_name)?;

        Ok(SpecStatus {
            requires_approval: !spec.current_phase.is_terminal(),
            feature_name: spec.feature_name,
            current_phase: spec.current_phase,
            documents,
        })
    }

    /// Lists all specs with lightweight metadata, newest first.
    pub fn list_specs(&self) -> Result<Vec<SpecMetadata>> {
        self.store.list()
    }

    /// Reads a phase document verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::DocumentNotFound`] if the document has not been
    /// written yet.
    pub fn read_document(&self, feature_name: &str, phase: Phase) -> Result<String> {
        self.store.read_document(feature_name, phase)
    }

    /// Renders a starter document for a spec's phase from the scaffold
    /// templates.
    ///
    /// The scaffold is returned to the caller, never persisted, and never
    /// affects the workflow: only an explicit update with approval moves a
    /// spec forward.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::InvalidPhase`] if the target phase carries no
    /// document, [`SpecError::SpecNotFound`] for unknown specs.
    pub fn document_scaffold(&self, feature_name: &str, phase: Option<Phase>) -> Result<String> {
        let spec = self.store.load(feature_name)?;
        let phase = phase.unwrap_or(spec.current_phase);

        if phase.document_file().is_none() {
            return Err(SpecError::InvalidPhase(phase));
        }

        let context = ScaffoldContext::new(&spec.feature_name)
            .with_description(&spec.description)
            .with_phase(phase.as_str());

        Ok(self.templates.render(phase.as_str(), &context)?)
    }

    fn spec_lock(&self, feature_name: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.entry(feature_name.to_string()).or_default().clone()
    }
}

impl std::fmt::Debug for SpecService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpecService")
            .field("max_document_size", &self.max_document_size)
            .finish_non_exhaustive()
    }
}
