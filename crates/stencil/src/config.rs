//! Render configuration.
//!
//! [`RenderConfig`] controls how contained failures are presented and which
//! resource limits apply. The defaults impose no limits and present failures
//! as a small markup fragment.
//!
//! Configs can be built in code or loaded from YAML:
//!
//! ```rust
//! use stencil::{Diagnostic, RenderConfig};
//!
//! let config = RenderConfig::from_yaml(r#"
//! diagnostic: plain
//! limits:
//!   max_template_len: 65536
//!   max_iterations: 10000
//! "#).unwrap();
//!
//! assert_eq!(config.diagnostic, Diagnostic::Plain);
//! assert_eq!(config.limits.max_iterations, Some(10000));
//! assert_eq!(config.limits.max_depth, None);
//! ```

use std::fmt;

use serde::Deserialize;

use crate::error::RenderError;

/// How a contained failure is presented to the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Diagnostic {
    /// `<div class="template-error">Template error: ...</div>`, reason HTML-escaped.
    #[default]
    Markup,
    /// `[template error: ...]`
    Plain,
}

impl Diagnostic {
    /// Builds the fragment returned in place of rendered output.
    pub fn fragment(self, err: &RenderError) -> String {
        match self {
            Diagnostic::Markup => format!(
                "<div class=\"template-error\">Template error: {}</div>",
                escape_html(&err.to_string())
            ),
            Diagnostic::Plain => format!("[template error: {}]", err),
        }
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Which resource limit was exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LimitKind {
    TemplateLength,
    Iterations,
    Depth,
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LimitKind::TemplateLength => "template length",
            LimitKind::Iterations => "iteration",
            LimitKind::Depth => "nesting depth",
        })
    }
}

/// Optional bounds for renders of untrusted templates or payloads.
///
/// `None` means unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Limits {
    /// Maximum template length in bytes.
    pub max_template_len: Option<usize>,
    /// Maximum number of `each` body evaluations across one render.
    pub max_iterations: Option<usize>,
    /// Maximum block nesting depth.
    pub max_depth: Option<usize>,
}

impl Limits {
    /// No limits.
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn max_template_len(mut self, max: usize) -> Self {
        self.max_template_len = Some(max);
        self
    }

    pub fn max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = Some(max);
        self
    }

    pub fn max_depth(mut self, max: usize) -> Self {
        self.max_depth = Some(max);
        self
    }

    pub(crate) fn check(kind: LimitKind, max: Option<usize>, actual: usize) -> Result<(), RenderError> {
        match max {
            Some(max) if actual > max => Err(RenderError::LimitExceeded { kind, max }),
            _ => Ok(()),
        }
    }
}

/// Configuration for a render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub diagnostic: Diagnostic,
    pub limits: Limits,
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a config from a YAML document. Missing keys take their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, RenderError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn diagnostic(mut self, diagnostic: Diagnostic) -> Self {
        self.diagnostic = diagnostic;
        self
    }

    pub fn limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }
}
