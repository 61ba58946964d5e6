//! Expression trees produced by the parser.
//!
//! Each node owns its operands, so dropping the root releases the whole tree.
//! Variable nodes and closure calls only borrow caller-owned state.

use crate::binding::Function;
use core::cell::Cell;
use core::fmt;

#[derive(Debug, Clone)]
pub enum Node<'a> {
    Constant(f64),

    /// A caller-owned cell, read afresh on every evaluation.
    Variable { name: &'a str, cell: &'a Cell<f64> },

    Call(Call<'a>),
}

/// A function applied to owned operand nodes. Arity is `args.len()`.
#[derive(Debug, Clone)]
pub struct Call<'a> {
    pub function: Function<'a>,
    pub args: Vec<Node<'a>>,
}

impl<'a> Node<'a> {
    pub fn constant(value: f64) -> Self {
        Node::Constant(value)
    }

    pub fn variable(name: &'a str, cell: &'a Cell<f64>) -> Self {
        Node::Variable { name, cell }
    }

    pub fn call(function: Function<'a>, args: Vec<Node<'a>>) -> Self {
        debug_assert!(
            args.len() == function.arity,
            "'{}' expects {} operands, got {}",
            function.name,
            function.arity,
            args.len()
        );
        Node::Call(Call { function, args })
    }

    /// Placeholder for a production that failed to parse.
    pub(crate) fn invalid() -> Self {
        Node::Constant(f64::NAN)
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, Node::Constant(_))
    }

    pub fn as_constant(&self) -> Option<f64> {
        match self {
            Node::Constant(value) => Some(*value),
            _ => None,
        }
    }

    /// Number of nodes in this tree, including `self`.
    pub fn node_count(&self) -> usize {
        match self {
            Node::Constant(_) | Node::Variable { .. } => 1,
            Node::Call(call) => 1 + call.args.iter().map(Node::node_count).sum::<usize>(),
        }
    }
}

/// S-expression form: `(+ 2 (* 3 x))`.
impl fmt::Display for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Constant(value) => write!(f, "{}", value),
            Node::Variable { name, .. } => f.write_str(name),
            Node::Call(call) => {
                if call.args.is_empty() {
                    return write!(f, "({})", call.function.name);
                }
                write!(f, "({}", call.function.name)?;
                for arg in &call.args {
                    write!(f, " {}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}
