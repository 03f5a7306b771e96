//! Error types for template rendering.
//!
//! [`RenderError`] is returned by the fallible entry points (`try_render`,
//! [`Template::parse`](crate::Template::parse), [`Renderer::add_template`](crate::Renderer::add_template)).
//! The infallible `render` family never returns it: every error is turned
//! into a diagnostic fragment at the boundary.

use stencil_parser::ParseError;
use thiserror::Error;

use crate::config::LimitKind;

/// Error type for template rendering operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The template is structurally malformed.
    #[error("malformed template: {0}")]
    Malformed(#[from] ParseError),

    /// A configured resource limit was exceeded.
    #[error("{kind} limit exceeded (max {max})")]
    LimitExceeded { kind: LimitKind, max: usize },

    /// Named template not registered with the renderer.
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    /// Data could not be serialized into a context value.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(String),

    /// Any other failure during parse or evaluation.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        RenderError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for RenderError {
    fn from(err: serde_yaml::Error) -> Self {
        RenderError::Config(err.to_string())
    }
}
