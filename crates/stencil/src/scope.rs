//! The scope stack threaded through evaluation.

use serde_json::Value;
use stencil_parser::Path;

use crate::path::resolve_segments;

/// An ordered stack of context frames.
///
/// The root frame is the render context. Each `each` iteration pushes the
/// current item and pops it when the body is done.
#[derive(Debug, Clone)]
pub struct Scope<'a> {
    /// Never empty: index 0 is the root context and `pop` refuses to remove it.
    frames: Vec<&'a Value>,
}

static MISSING_FRAME: Value = Value::Null;

impl<'a> Scope<'a> {
    /// Creates a single-frame scope seeded with `root`.
    pub fn new(root: &'a Value) -> Self {
        Self { frames: vec![root] }
    }

    pub fn push(&mut self, frame: &'a Value) {
        self.frames.push(frame);
    }

    /// Pops the innermost frame. The root frame is never removed.
    pub fn pop(&mut self) -> Option<&'a Value> {
        if self.frames.len() > 1 {
            self.frames.pop()
        } else {
            None
        }
    }

    /// Number of frames, including the root.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// The innermost frame, i.e. what `this` refers to.
    pub fn current(&self) -> &'a Value {
        self.frames.last().copied().unwrap_or(&MISSING_FRAME)
    }

    /// Looks up a path.
    ///
    /// `this`-anchored paths consult only the innermost frame. Other paths
    /// are tried against each frame from innermost to root and the first
    /// hit wins.
    pub fn lookup(&self, path: &Path) -> Option<&'a Value> {
        if path.is_anchored() {
            return resolve_segments(self.current(), path.segments());
        }
        self.frames
            .iter()
            .rev()
            .find_map(|&frame| resolve_segments(frame, path.segments()))
    }
}
