//! Directive parser for stencil display templates.
//!
//! This crate turns a template string into a tree of [`Node`]s. Templates mix
//! literal text with three directive forms:
//!
//! - `{{path}}` - variable interpolation
//! - `{{#if path}}...{{else}}...{{/if}}` - conditional, `else` optional
//! - `{{#each path}}...{{/each}}` - iteration over a sequence
//!
//! Blocks nest arbitrarily. The parser is single-pass and stack-based: every
//! close marker is paired with the innermost open block, so a conditional
//! inside a loop (or a loop inside a loop) gets exactly its own span as body.
//!
//! # Example
//!
//! ```rust
//! use stencil_parser::{parse, Node};
//!
//! let nodes = parse("{{#each items}}{{#if this.active}}{{this.name}}{{/if}}{{/each}}").unwrap();
//! assert_eq!(nodes.len(), 1);
//!
//! let Node::Iteration { path, body } = &nodes[0] else { panic!("expected each") };
//! assert_eq!(path.as_str(), "items");
//! assert!(matches!(body[0], Node::Conditional { .. }));
//! ```
//!
//! # Malformed Templates
//!
//! Unclosed `{{`, unknown block keywords, unmatched or mismatched close
//! markers and stray `{{else}}` markers are reported as [`ParseError`]s
//! carrying the byte offset of the offending directive.
//!
//! [`parse_with_max_depth`] additionally bounds block nesting while
//! scanning, for templates from untrusted sources.
//!
//! # Path Syntax
//!
//! A path is one or more identifiers joined by `.`. Identifiers may contain
//! letters, digits, `_`, `-` and `$`. A leading `this` segment anchors the
//! path to the innermost iteration item. There is no array-index syntax.

mod error;
mod node;
mod parser;
mod token;

pub use error::ParseError;
pub use node::{nesting_depth, BlockKind, Node, Path};
pub use parser::{parse, parse_with_max_depth};
