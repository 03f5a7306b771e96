//! Render entry points.
//!
//! | Function | Returns | Use When |
//! |----------|---------|----------|
//! | [`render`] | `String` | Default config, failures become a fragment |
//! | [`render_with_config`] | `String` | Custom diagnostics or limits |
//! | [`render_serialize`] | `String` | Context is a `Serialize` type, not a `Value` |
//! | [`render_serialize_with_config`] | `String` | Both of the above |
//! | [`try_render`] | `Result` | Caller wants the error itself |
//! | [`validate_template`] | `Result` | Checking templates at load time or in tests |
//!
//! The `String`-returning functions never fail and never panic: malformed
//! templates, exceeded limits and unexpected internal failures are all turned
//! into a diagnostic fragment (see [`Diagnostic`](crate::Diagnostic)).

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::template::Template;

/// Renders `template` against `context` with the default config.
///
/// ```rust
/// use serde_json::json;
/// use stencil::render;
///
/// let out = render(
///     "{{#if paid}}Paid {{amount}}{{else}}Due {{dueDate}}{{/if}}",
///     &json!({"paid": false, "amount": 12, "dueDate": "2024-07-01"}),
/// );
/// assert_eq!(out, "Due 7/1/2024");
///
/// let broken = render("{{#if paid}}never closed", &json!({}));
/// assert!(broken.starts_with("<div class=\"template-error\">"));
/// ```
pub fn render(template: &str, context: &Value) -> String {
    render_with_config(template, context, &RenderConfig::default())
}

/// Renders with an explicit config.
pub fn render_with_config(template: &str, context: &Value, config: &RenderConfig) -> String {
    contain(config, || try_render_with_config(template, context, config))
}

/// Serializes `data` to a context value and renders it.
pub fn render_serialize<T: Serialize + ?Sized>(template: &str, data: &T) -> String {
    render_serialize_with_config(template, data, &RenderConfig::default())
}

/// Serializes `data` and renders it with an explicit config. Serialization
/// failures are contained like any other failure.
pub fn render_serialize_with_config<T: Serialize + ?Sized>(
    template: &str,
    data: &T,
    config: &RenderConfig,
) -> String {
    contain(config, || {
        let context = serde_json::to_value(data)?;
        try_render_with_config(template, &context, config)
    })
}

/// Renders with the default config, returning errors instead of a fragment.
pub fn try_render(template: &str, context: &Value) -> Result<String, RenderError> {
    try_render_with_config(template, context, &RenderConfig::default())
}

/// Renders with an explicit config, returning errors instead of a fragment.
pub fn try_render_with_config(
    template: &str,
    context: &Value,
    config: &RenderConfig,
) -> Result<String, RenderError> {
    Template::parse_with_limits(template, &config.limits)?
        .render_with_limits(context, &config.limits)
}

/// Checks that a template parses.
///
/// ```rust
/// use stencil::validate_template;
///
/// assert!(validate_template("{{#each rows}}{{this.id}}{{/each}}").is_ok());
/// assert!(validate_template("{{#each rows}}{{/if}}").is_err());
/// ```
pub fn validate_template(template: &str) -> Result<(), RenderError> {
    Template::parse(template).map(|_| ())
}

/// Runs `f`, turning an error or a panic into the configured fragment.
pub(crate) fn contain<F>(config: &RenderConfig, f: F) -> String
where
    F: FnOnce() -> Result<String, RenderError>,
{
    let outcome = panic::catch_unwind(AssertUnwindSafe(f))
        .unwrap_or_else(|payload| Err(RenderError::Internal(panic_message(&*payload))));

    match outcome {
        Ok(output) => output,
        Err(err) => {
            warn!(error = %err, "template render failed, emitting diagnostic");
            config.diagnostic.fragment(&err)
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "panic during render".to_string()
    }
}
