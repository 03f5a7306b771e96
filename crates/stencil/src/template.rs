//! Parsed, reusable templates.

use std::str::FromStr;

use serde_json::Value;
use stencil_parser::{nesting_depth, parse_with_max_depth, Node, ParseError};
use tracing::debug;

use crate::config::{LimitKind, Limits};
use crate::error::RenderError;
use crate::eval::evaluate;
use crate::scope::Scope;

/// A template parsed once and rendered any number of times.
///
/// ```rust
/// use serde_json::json;
/// use stencil::Template;
///
/// let template = Template::parse("{{#each xs}}<{{this}}>{{/each}}").unwrap();
/// assert_eq!(template.render(&json!({"xs": ["a", "b"]})).unwrap(), "<a><b>");
/// assert_eq!(template.render(&json!({"xs": []})).unwrap(), "");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    nodes: Vec<Node>,
    source_len: usize,
    depth: usize,
}

impl Template {
    /// Parses a template without applying any limits.
    pub fn parse(source: &str) -> Result<Self, RenderError> {
        Self::parse_with_limits(source, &Limits::unbounded())
    }

    /// Parses a template, enforcing the length and depth limits.
    pub fn parse_with_limits(source: &str, limits: &Limits) -> Result<Self, RenderError> {
        Limits::check(LimitKind::TemplateLength, limits.max_template_len, source.len())?;

        // Depth is bounded during the scan; a too-deep tree is never built.
        let nodes = parse_with_max_depth(source, limits.max_depth).map_err(|err| match err {
            ParseError::DepthExceeded { max, .. } => RenderError::LimitExceeded {
                kind: LimitKind::Depth,
                max,
            },
            other => RenderError::Malformed(other),
        })?;
        let depth = nesting_depth(&nodes);

        debug!(len = source.len(), nodes = nodes.len(), depth, "parsed template");
        Ok(Self {
            nodes,
            source_len: source.len(),
            depth,
        })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Block nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Length of the source this template was parsed from, in bytes.
    pub fn source_len(&self) -> usize {
        self.source_len
    }

    /// Renders against `context` with no iteration limit.
    pub fn render(&self, context: &Value) -> Result<String, RenderError> {
        self.render_with_limits(context, &Limits::unbounded())
    }

    /// Renders against a fresh single-frame scope seeded with `context`.
    pub fn render_with_limits(&self, context: &Value, limits: &Limits) -> Result<String, RenderError> {
        let mut scope = Scope::new(context);
        let output = evaluate(&self.nodes, &mut scope, limits)?;
        debug!(len = output.len(), "rendered template");
        Ok(output)
    }
}

impl FromStr for Template {
    type Err = RenderError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        Self::parse(source)
    }
}
