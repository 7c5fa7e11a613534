//! Template engine trait definition.

use serde::Serialize;

use crate::error::Result;

/// Trait for rendering scaffold templates with dynamic context.
///
/// Implementations handle loading and rendering of templates; the default
/// implementation is [`TemplateManager`](crate::TemplateManager) backed by
/// minijinja.
pub trait TemplateEngine {
    /// Renders a template with the provided context.
    ///
    /// # Arguments
    ///
    /// * `template` - Name of the template without extension (e.g.
    ///   "requirements")
    /// * `ctx` - Context data to use for rendering
    ///
    /// # Errors
    ///
    /// Returns an error if the template does not exist or rendering fails.
    fn render<T: Serialize>(&self, template: &str, ctx: &T) -> Result<String>;

    /// Lists all available template names (without extensions).
    ///
    /// # Errors
    ///
    /// Returns an error if the template directory cannot be read.
    fn list_templates(&self) -> Result<Vec<String>>;
}
