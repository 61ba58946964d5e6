//! Compiled keycalc expressions.

use crate::ast::Node;
use crate::evaluator;
use core::fmt;

/// A compiled formula, ready to be evaluated any number of times.
///
/// The tree owns its nodes and borrows only what it resolved from the
/// bindings: variable cells and closure contexts. Those must outlive `'a`;
/// the tree never frees them. Dropping the expression frees every node
/// exactly once.
#[derive(Debug, Clone)]
pub struct CompiledExpression<'a> {
    root: Node<'a>,
    source: String,
}

impl<'a> CompiledExpression<'a> {
    pub(crate) fn new(root: Node<'a>, source: &str) -> Self {
        Self {
            root,
            source: source.to_string(),
        }
    }

    /// Evaluate the expression, reading bound variables as they are now.
    pub fn evaluate(&self) -> f64 {
        evaluator::eval(&self.root)
    }

    pub fn root(&self) -> &Node<'a> {
        &self.root
    }

    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    /// The text this expression was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Formats the tree as an S-expression, e.g. `(+ 2 (* 3 x))`.
impl fmt::Display for CompiledExpression<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)
    }
}
