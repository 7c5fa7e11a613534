//! Scaffold template crate for specflow.
//!
//! Provides template loading and rendering using minijinja. Each
//! document-bearing workflow phase has a bundled starter template
//! (requirements, design, tasks); a user directory of `.j2` files can
//! override the whole set.
//!
//! # Examples
//!
//! ```
//! use specflow_templates::{ScaffoldContext, TemplateEngine, TemplateManager};
//!
//! let manager = TemplateManager::builtin()?;
//!
//! let context = ScaffoldContext::new("add-caching")
//!     .with_description("Cache hot lookups")
//!     .with_phase("design");
//!
//! let scaffold = manager.render("design", &context)?;
//! assert!(scaffold.starts_with("# Design: add-caching"));
//! # Ok::<(), specflow_templates::TemplateError>(())
//! ```

pub mod context;
pub mod engine;
pub mod error;
pub mod manager;

// Re-export public types for convenience
pub use context::ScaffoldContext;
pub use engine::TemplateEngine;
pub use error::{Result, TemplateError};
pub use manager::TemplateManager;
