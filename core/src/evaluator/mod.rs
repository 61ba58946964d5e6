//! Tree-walking evaluator.
//!
//! Evaluation never fails: numeric problems (division by zero, domain errors)
//! propagate as IEEE 754 infinities and NaNs. Variables are read from their
//! cells on every call, so one tree can be evaluated against changing inputs.

use crate::ast::Node;
use crate::binding::MAX_ARITY;
use smallvec::SmallVec;

/// Evaluate a tree. `None` evaluates to NaN.
pub fn evaluate(node: Option<&Node<'_>>) -> f64 {
    match node {
        Some(node) => eval(node),
        None => f64::NAN,
    }
}

/// Evaluate a tree, operands left to right.
pub fn eval(node: &Node<'_>) -> f64 {
    match node {
        Node::Constant(value) => *value,
        Node::Variable { cell, .. } => cell.get(),
        Node::Call(call) => {
            if call.args.len() > MAX_ARITY {
                return f64::NAN;
            }
            let args: SmallVec<[f64; MAX_ARITY]> = call.args.iter().map(eval).collect();
            call.function.call(&args)
        }
    }
}
