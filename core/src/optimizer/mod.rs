//! Constant folding.
//!
//! A call to a pure function whose operands are all constants is evaluated
//! once at compile time and replaced, in place, by a constant node. Variables
//! are never folded, and neither are impure calls or anything beneath them.

use crate::ast::Node;
use crate::evaluator::eval;

/// Fold constant subtrees of `node` in place.
pub fn optimize(node: &mut Node<'_>) {
    let Node::Call(call) = node else {
        return;
    };
    if !call.function.pure {
        return;
    }

    let mut known = true;
    for arg in call.args.iter_mut() {
        optimize(arg);
        known &= arg.is_constant();
    }

    if known {
        let value = eval(node);
        *node = Node::Constant(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::{Binding, Function, Resolver, builtins::BUILTINS};
    use crate::parser::parse;
    use core::cell::Cell;
    use pretty_assertions::assert_eq;

    fn folded(source: &str, bindings: &[Binding<'_>]) -> String {
        let mut node = parse(source, Resolver::new(bindings, BUILTINS)).unwrap();
        optimize(&mut node);
        node.to_string()
    }

    #[test]
    fn test_constant_expression_folds_to_one_node() {
        let mut node = parse("2+3*4", Resolver::builtins_only()).unwrap();
        assert_eq!(node.node_count(), 5);
        optimize(&mut node);
        assert_eq!(node.node_count(), 1);
        assert_eq!(node.as_constant(), Some(14.0));
    }

    #[test]
    fn test_variables_are_not_folded() {
        let x = Cell::new(1.0);
        let bindings = [Binding::variable("x", &x)];
        assert_eq!(folded("x + 2*3", &bindings), "(+ x 6)");
        assert_eq!(folded("2*3 + x", &bindings), "(+ 6 x)");
        assert_eq!(folded("x", &bindings), "x");
    }

    #[test]
    fn test_left_associative_chain_folds_prefix_only() {
        let x = Cell::new(1.0);
        let bindings = [Binding::variable("x", &x)];
        assert_eq!(folded("1 + 2 + x + 3", &bindings), "(+ (+ 3 x) 3)");
    }

    #[test]
    fn test_pure_functions_fold() {
        assert_eq!(folded("sqrt 16 + floor pi", &[]), "7");
        assert_eq!(folded("-5", &[]), "-5");
    }

    #[test]
    fn test_impure_call_is_not_folded() {
        let bindings = [Binding::function("twice", 1, |args| args[0] * 2.0)];
        assert_eq!(folded("twice 3", &bindings), "(twice 3)");
        assert_eq!(folded("1 + twice 3", &bindings), "(+ 1 (twice 3))");
    }

    #[test]
    fn test_operands_of_impure_call_are_left_alone() {
        let bindings = [Binding::function("twice", 1, |args| args[0] * 2.0)];
        assert_eq!(folded("twice -3", &bindings), "(twice (neg 3))");
    }

    #[test]
    fn test_pure_closure_folds() {
        let offset = 10.0;
        let shift = |args: &[f64]| args[0] + offset;
        let bindings = [Binding::closure("shift", 1, &shift).pure()];
        assert_eq!(folded("shift 1 * 2", &bindings), "22");
    }

    #[test]
    fn test_impure_closure_does_not_fold() {
        let calls = Cell::new(0);
        let counter = |_: &[f64]| {
            calls.set(calls.get() + 1);
            calls.get() as f64
        };
        let bindings = [Binding::closure("tick", 0, &counter)];
        assert_eq!(folded("tick + 1", &bindings), "(+ (tick) 1)");
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_pure_nullary_function_folds() {
        let answer = Function::native("answer", 0, |_| 42.0).pure();
        let mut node = Node::call(answer, vec![]);
        optimize(&mut node);
        assert_eq!(node.as_constant(), Some(42.0));
    }

    #[test]
    fn test_folding_preserves_nan_and_infinity() {
        assert_eq!(folded("1/0", &[]), "inf");
        assert_eq!(folded("1%0", &[]), "NaN");
    }
}
