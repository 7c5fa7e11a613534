//! Specflow core - spec-driven feature workflow engine.
//!
//! This crate walks a feature spec through three sequential document phases
//! (requirements, design, tasks) and a terminal complete state, persisting
//! each phase's content on disk and gating advancement on an explicit
//! approval flag. A phase transition never happens implicitly.
//!
//! # Architecture
//!
//! - [`phase`]: the fixed forward-only phase sequence
//! - [`spec`]: spec model and feature-name derivation
//! - [`store`]: on-disk persistence (one directory per spec)
//! - [`workflow`]: the stateless advancement state machine
//! - [`service`]: the callable facade composing store and engine
//! - [`config`]: paths and limits
//! - [`error`]: error taxonomy and result alias
//! - [`tools`]: file system adapter seam
//!
//! # Example
//!
//! ```no_run
//! use specflow_core::{Phase, SpecService, SpecflowConfig};
//! use std::path::PathBuf;
//!
//! # fn main() -> specflow_core::Result<()> {
//! let config = SpecflowConfig::new(PathBuf::from("/path/to/workdir"));
//! let service = SpecService::new(&config)?;
//!
//! service.create_spec("user-auth", "Login and session handling")?;
//!
//! // Writing the document does not advance the phase...
//! let outcome =
//!     service.update_spec_document("user-auth", Phase::Requirements, "# Requirements", false)?;
//! assert_eq!(outcome.current_phase, Phase::Requirements);
//!
//! // ...explicit approval does, one step at a time.
//! let outcome =
//!     service.update_spec_document("user-auth", Phase::Requirements, "# Requirements", true)?;
//! assert_eq!(outcome.current_phase, Phase::Design);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod phase;
pub mod service;
pub mod spec;
pub mod store;
pub mod tools;
pub mod workflow;

// Re-export core types for convenience
pub use config::SpecflowConfig;
pub use error::{Result, SpecError};
pub use phase::Phase;
pub use service::{CreatedSpec, SpecService, SpecStatus, UpdateOutcome};
pub use spec::{Spec, SpecMetadata, derive_feature_name};
pub use store::SpecStore;
pub use workflow::{WorkflowDecision, WorkflowEngine};
