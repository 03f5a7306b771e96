//! Named template registry.

use std::collections::HashMap;

use serde_json::Value;

use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::functions::{contain, try_render_with_config};
use crate::template::Template;

/// Holds a config and a set of pre-parsed named templates.
///
/// Templates are parsed once in [`add_template`](Self::add_template), so
/// malformed sources are rejected at registration time. Every response view
/// that displays templated results can share one `Renderer`.
///
/// ```rust
/// use serde_json::json;
/// use stencil::Renderer;
///
/// let mut renderer = Renderer::new();
/// renderer
///     .add_template("weather", "{{city}}: {{#if rain}}bring an umbrella{{else}}clear{{/if}}")
///     .unwrap();
///
/// let out = renderer.render_named("weather", &json!({"city": "Bergen", "rain": true}));
/// assert_eq!(out, "Bergen: bring an umbrella");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: RenderConfig,
    templates: HashMap<String, Template>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self {
            config,
            templates: HashMap::new(),
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Parses and registers a template, replacing any previous one with the
    /// same name. Length and depth limits from the config apply.
    pub fn add_template(&mut self, name: &str, source: &str) -> Result<(), RenderError> {
        let template = Template::parse_with_limits(source, &self.config.limits)?;
        self.templates.insert(name.to_string(), template);
        Ok(())
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    pub fn remove_template(&mut self, name: &str) -> Option<Template> {
        self.templates.remove(name)
    }

    /// Renders a registered template. Unknown names and render failures
    /// produce the configured diagnostic fragment.
    pub fn render_named(&self, name: &str, context: &Value) -> String {
        contain(&self.config, || self.try_render_named(name, context))
    }

    pub fn try_render_named(&self, name: &str, context: &Value) -> Result<String, RenderError> {
        let template = self
            .templates
            .get(name)
            .ok_or_else(|| RenderError::TemplateNotFound(name.to_string()))?;
        template.render_with_limits(context, &self.config.limits)
    }

    /// Renders an unregistered template source with this renderer's config.
    pub fn render_str(&self, source: &str, context: &Value) -> String {
        contain(&self.config, || {
            try_render_with_config(source, context, &self.config)
        })
    }
}
