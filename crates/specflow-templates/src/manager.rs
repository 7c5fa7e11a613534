//! Template manager implementation using minijinja.

use std::path::PathBuf;

use serde::Serialize;

use crate::engine::TemplateEngine;
use crate::error::{Result, TemplateError};

/// Built-in scaffold templates, one per document-bearing phase.
const BUILTIN_TEMPLATES: [(&str, &str); 3] = [
    ("requirements.j2", include_str!("../templates/requirements.j2")),
    ("design.j2", include_str!("../templates/design.j2")),
    ("tasks.j2", include_str!("../templates/tasks.j2")),
];

/// Manager for loading and rendering scaffold templates.
///
/// Wraps the minijinja environment. Templates either come bundled with the
/// crate ([`TemplateManager::builtin`]) or from a user override directory of
/// `.j2` files ([`TemplateManager::from_dir`]).
///
/// # Examples
///
/// ```
/// use specflow_templates::{ScaffoldContext, TemplateEngine, TemplateManager};
///
/// let manager = TemplateManager::builtin()?;
/// let context = ScaffoldContext::new("user-auth").with_phase("requirements");
/// let scaffold = manager.render("requirements", &context)?;
/// assert!(scaffold.contains("user-auth"));
/// # Ok::<(), specflow_templates::TemplateError>(())
/// ```
#[derive(Debug)]
pub struct TemplateManager {
    /// Override directory, `None` when using bundled templates.
    templates_dir: Option<PathBuf>,
    /// Minijinja environment for template rendering.
    env: minijinja::Environment<'static>,
}

impl TemplateManager {
    /// Creates a manager serving the bundled templates.
    ///
    /// # Errors
    ///
    /// Returns an error if a bundled template fails to parse; this only
    /// happens when the crate itself ships a broken template.
    pub fn builtin() -> Result<Self> {
        let mut env = minijinja::Environment::new();
        for (name, source) in BUILTIN_TEMPLATES {
            env.add_template(name, source)
                .map_err(|e| TemplateError::InvalidBuiltinTemplate(format!("{name}: {e}")))?;
        }

        Ok(Self {
            templates_dir: None,
            env,
        })
    }

    /// Creates a manager loading `.j2` templates from a directory.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::TemplateDirectoryNotFound`] if the directory
    /// does not exist.
    pub fn from_dir(templates_dir: PathBuf) -> Result<Self> {
        if !templates_dir.is_dir() {
            return Err(TemplateError::TemplateDirectoryNotFound(templates_dir));
        }

        let mut env = minijinja::Environment::new();
        env.set_loader(minijinja::path_loader(&templates_dir));

        Ok(Self {
            templates_dir: Some(templates_dir),
            env,
        })
    }

    /// Loads a template by name; templates use a `.j2` extension.
    fn load_template(&self, name: &str) -> Result<minijinja::Template<'_, '_>> {
        let template_name = format!("{name}.j2");
        self.env
            .get_template(&template_name)
            .map_err(|e| TemplateError::TemplateNotFound(format!("{name}: {e}")))
    }
}

impl TemplateEngine for TemplateManager {
    fn render<T: Serialize>(&self, template: &str, ctx: &T) -> Result<String> {
        let tmpl = self.load_template(template)?;
        tmpl.render(ctx)
            .map_err(|e| TemplateError::TemplateRenderError(format!("{template}: {e}")))
    }

    fn list_templates(&self) -> Result<Vec<String>> {
        let Some(dir) = &self.templates_dir else {
            return Ok(BUILTIN_TEMPLATES
                .iter()
                .filter_map(|(name, _)| name.strip_suffix(".j2"))
                .map(str::to_string)
                .collect());
        };

        let entries = std::fs::read_dir(dir).map_err(|source| TemplateError::TemplateListError {
            path: dir.clone(),
            source,
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| TemplateError::TemplateListError {
                path: dir.clone(),
                source,
            })?;
            let file_name = entry.file_name().to_string_lossy().to_string();
            if let Some(name) = file_name.strip_suffix(".j2") {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}
