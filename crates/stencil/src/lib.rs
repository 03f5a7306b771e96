//! # Stencil - Display Templates for Result Payloads
//!
//! `stencil` renders a schema-authored display template against an arbitrary
//! JSON result payload, producing a text or markup fragment for a host view.
//!
//! ## Template Language
//!
//! ```text
//! {{path}}                               interpolate a value
//! {{#if path}}...{{else}}...{{/if}}      conditional ({{else}} optional)
//! {{#each path}}...{{/each}}             iterate a sequence
//! {{this}} / {{this.prop}}               the current iteration item
//! ```
//!
//! Paths are dotted keys (`order.customer.name`). A missing key renders as
//! an empty string. Blocks nest freely; each close marker pairs with the
//! innermost open block.
//!
//! Inside `each`, `this.*` paths read only the current item, while plain
//! paths try the current item first and then each enclosing scope up to the
//! root context.
//!
//! ## Formatting
//!
//! Interpolated values are formatted by the name of the final path segment:
//! fields named like `*date*` render date strings as `1/15/2024`, fields
//! named like `*price*` or `*amount*` render numbers as `$1,234.50`.
//! Everything else is rendered literally. See [`format`](fn@format).
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use stencil::render;
//!
//! let template = "{{#each items}}{{#if this.inStock}}{{this.name}}: {{this.price}}\n{{/if}}{{/each}}";
//! let payload = json!({
//!     "items": [
//!         {"name": "Lamp", "price": 39.5, "inStock": true},
//!         {"name": "Desk", "price": 240, "inStock": false},
//!         {"name": "Rug", "price": 1250, "inStock": true},
//!     ]
//! });
//!
//! assert_eq!(render(template, &payload), "Lamp: $39.50\nRug: $1,250.00\n");
//! ```
//!
//! ## Failure Containment
//!
//! [`render`] never fails. A malformed template, an exceeded
//! [`Limits`] bound or an unexpected internal failure produces a diagnostic
//! fragment instead (see [`Diagnostic`]). Use [`try_render`] or
//! [`validate_template`] to get the [`RenderError`] itself.
//!
//! ## Security
//!
//! Output is not escaped. Hosts that insert it into markup must only use
//! trusted templates and escape untrusted payload values themselves.
//!
//! ## Key Types
//!
//! - [`Template`]: a parsed template, reusable across renders
//! - [`Renderer`]: named templates sharing one [`RenderConfig`]
//! - [`Scope`]: the frame stack used during evaluation

mod config;
mod error;
mod eval;
pub mod format;
mod functions;
mod path;
mod renderer;
mod scope;
mod template;

pub use config::{Diagnostic, LimitKind, Limits, RenderConfig};
pub use error::RenderError;
pub use eval::{evaluate, is_truthy};
pub use format::{format, FormatError};
pub use functions::{
    render, render_serialize, render_serialize_with_config, render_with_config, try_render,
    try_render_with_config, validate_template,
};
pub use path::{resolve, resolve_segments};
pub use renderer::Renderer;
pub use scope::Scope;
pub use template::Template;

// Parser types, for callers that inspect templates
pub use stencil_parser::{parse, BlockKind, Node, ParseError, Path};
