//! Page rendering with Tera templates.

pub mod markdown;

use std::collections::HashMap;
use std::path::Path;

use serde::Serialize;
use tera::{Context, Tera, Value};

use crate::config::{Config, MarkdownConfig};
use crate::mapper::BasePage;

use markdown::render_markdown;

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error("templates not found: {0}")]
    TemplatesNotFound(String),
}

/// A per-request helper callable from templates, e.g. `figure(path="abc")`.
pub type TemplateFunction =
    Box<dyn Fn(&HashMap<String, Value>) -> tera::Result<Value> + Send + Sync>;

/// The template renderer, wrapping Tera.
#[derive(Clone)]
pub struct Renderer {
    tera: Tera,
    pattern_library_assets_path: String,
    site_domain: String,
    beta_banner_enabled: bool,
}

impl Renderer {
    /// Create a renderer loading every `.html` template under the directory.
    pub fn new(templates_dir: &Path, config: &Config) -> Result<Self, RenderError> {
        if !templates_dir.exists() {
            return Err(RenderError::TemplatesNotFound(
                templates_dir.display().to_string(),
            ));
        }

        let glob = templates_dir.join("**/*.html");
        let glob_str = glob.to_string_lossy();
        let tera = Tera::new(&glob_str)?;

        Ok(Self::with_tera(tera, config))
    }

    /// Create a renderer from in-memory templates.
    pub fn from_raw_templates(
        templates: &[(&str, &str)],
        config: &Config,
    ) -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(templates.to_vec())?;
        Ok(Self::with_tera(tera, config))
    }

    fn with_tera(mut tera: Tera, config: &Config) -> Self {
        register_markdown_filter(&mut tera, config.markdown.clone());
        Self {
            tera,
            pattern_library_assets_path: config.pattern_library_assets_path.clone(),
            site_domain: config.site_domain.clone(),
            beta_banner_enabled: config.beta_banner_enabled,
        }
    }

    /// The page chrome shared by every page, before any content is mapped in.
    pub fn new_base_page(&self, language: &str) -> BasePage {
        BasePage {
            language: language.to_string(),
            pattern_library_assets_path: self.pattern_library_assets_path.clone(),
            site_domain: self.site_domain.clone(),
            beta_banner_enabled: self.beta_banner_enabled,
            ..Default::default()
        }
    }

    /// Render `{template}.html` with the model's fields as the template context.
    pub fn build_page<M: Serialize>(
        &self,
        template: &str,
        model: &M,
    ) -> Result<String, RenderError> {
        render(&self.tera, template, model)
    }

    /// Like [`Renderer::build_page`], with extra functions available to this render only.
    pub fn build_page_with_functions<M: Serialize>(
        &self,
        template: &str,
        model: &M,
        functions: Vec<(&str, TemplateFunction)>,
    ) -> Result<String, RenderError> {
        let mut tera = self.tera.clone();
        for (name, function) in functions {
            tera.register_function(name, function);
        }
        render(&tera, template, model)
    }
}

/// `figure(path="abc123")`: the fragment resolved for a resource tag, or nothing.
pub fn figure_function(fragments: HashMap<String, String>) -> TemplateFunction {
    Box::new(move |args: &HashMap<String, Value>| {
        let path = args.get("path").and_then(Value::as_str).unwrap_or_default();
        Ok(Value::String(
            fragments.get(path).cloned().unwrap_or_default(),
        ))
    })
}

fn render<M: Serialize>(tera: &Tera, template: &str, model: &M) -> Result<String, RenderError> {
    let context = Context::from_serialize(model)?;
    Ok(tera.render(&format!("{}.html", template), &context)?)
}

/// `{{ text | markdown | safe }}`
fn register_markdown_filter(tera: &mut Tera, markdown: MarkdownConfig) {
    tera.register_filter(
        "markdown",
        move |value: &Value, _: &HashMap<String, Value>| {
            let text = tera::try_get_value!("markdown", "value", String, value);
            render_markdown(&text, &markdown)
                .map(Value::String)
                .map_err(|e| tera::Error::msg(e.to_string()))
        },
    );
}
