//! Tree-walking evaluation.

use serde_json::Value;
use stencil_parser::Node;

use crate::config::{LimitKind, Limits};
use crate::error::RenderError;
use crate::format::format;
use crate::scope::Scope;

/// Truthiness used by `{{#if}}`.
///
/// Missing, null, `false`, zero, the empty string and empty containers are
/// falsy; everything else is truthy.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
    }
}

/// Evaluates `nodes` against `scope`.
///
/// Evaluation itself cannot fail; an error is returned only when `limits`
/// bounds the number of loop iterations and the bound is crossed. The scope
/// is returned to its original depth either way.
pub fn evaluate(nodes: &[Node], scope: &mut Scope<'_>, limits: &Limits) -> Result<String, RenderError> {
    let mut evaluator = Evaluator::new(limits);
    evaluator.eval_nodes(nodes, scope)?;
    Ok(evaluator.output)
}

struct Evaluator<'l> {
    limits: &'l Limits,
    iterations: usize,
    output: String,
}

impl<'l> Evaluator<'l> {
    fn new(limits: &'l Limits) -> Self {
        Self {
            limits,
            iterations: 0,
            output: String::new(),
        }
    }

    fn eval_nodes(&mut self, nodes: &[Node], scope: &mut Scope<'_>) -> Result<(), RenderError> {
        for node in nodes {
            self.eval_node(node, scope)?;
        }
        Ok(())
    }

    fn eval_node(&mut self, node: &Node, scope: &mut Scope<'_>) -> Result<(), RenderError> {
        match node {
            Node::Text(text) => self.output.push_str(text),
            Node::Variable(path) => {
                let value = scope.lookup(path);
                self.output.push_str(&format(path.as_str(), value));
            }
            Node::Conditional {
                path,
                then_body,
                else_body,
            } => {
                let branch = if is_truthy(scope.lookup(path)) {
                    then_body
                } else {
                    else_body
                };
                self.eval_nodes(branch, scope)?;
            }
            Node::Iteration { path, body } => {
                // Non-sequences iterate zero times.
                if let Some(Value::Array(items)) = scope.lookup(path) {
                    for item in items {
                        self.iterations += 1;
                        Limits::check(
                            LimitKind::Iterations,
                            self.limits.max_iterations,
                            self.iterations,
                        )?;

                        scope.push(item);
                        let result = self.eval_nodes(body, scope);
                        scope.pop();
                        result?;
                    }
                }
            }
        }
        Ok(())
    }
}
