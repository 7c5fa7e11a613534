//! Context structure for scaffold rendering.

use serde::Serialize;

/// Context data provided to scaffold templates.
///
/// Carries the spec identity and description so a rendered scaffold can
/// reference the feature it belongs to.
///
/// # Examples
///
/// ```
/// use specflow_templates::ScaffoldContext;
///
/// let context = ScaffoldContext::new("user-auth")
///     .with_description("Login and session handling")
///     .with_phase("requirements");
/// assert_eq!(context.feature_name, "user-auth");
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScaffoldContext {
    /// Kebab-case feature identifier.
    pub feature_name: String,

    /// Free-text description supplied when the spec was created.
    pub description: String,

    /// Phase the scaffold targets ("requirements", "design", or "tasks").
    pub phase: String,
}

impl ScaffoldContext {
    /// Creates a context for the given feature.
    #[must_use]
    pub fn new(feature_name: impl Into<String>) -> Self {
        Self {
            feature_name: feature_name.into(),
            ..Default::default()
        }
    }

    /// Sets the spec description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the target phase name.
    #[must_use]
    pub fn with_phase(mut self, phase: impl Into<String>) -> Self {
        self.phase = phase.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let context = ScaffoldContext::new("data-export")
            .with_description("CSV export")
            .with_phase("design");

        assert_eq!(context.feature_name, "data-export");
        assert_eq!(context.description, "CSV export");
        assert_eq!(context.phase, "design");
    }

    #[test]
    fn test_default_fields_empty() {
        let context = ScaffoldContext::new("data-export");
        assert!(context.description.is_empty());
        assert!(context.phase.is_empty());
    }
}
