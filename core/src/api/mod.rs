//! Public API for compiling and evaluating formulas.
//!
//! There are two ways in:
//!
//! 1. **Free functions** (`interpret`, `compile`, `evaluate`, `release`) using
//!    the built-in functions only, plus whatever bindings the caller passes.
//! 2. **[`Engine`]**, which adds engine-wide bindings registered once and
//!    per-engine compilation defaults.
//!
//! # Example
//!
//! ```
//! use core::cell::Cell;
//! use keycalc_core::api::{self, Engine, EngineOptions};
//! use keycalc_core::binding::Binding;
//!
//! assert_eq!(api::interpret("2+3*4").unwrap(), 14.0);
//!
//! let x = Cell::new(5.0);
//! let bindings = [Binding::variable("x", &x)];
//! let expr = api::compile("x+1", &bindings).unwrap();
//! assert_eq!(expr.evaluate(), 6.0);
//! x.set(10.0);
//! assert_eq!(expr.evaluate(), 11.0);
//! api::release(Some(expr));
//!
//! let engine = Engine::new(EngineOptions::default(), |env| {
//!     env.register(Binding::function("half", 1, |args| args[0] / 2.0).pure())
//! })
//! .unwrap();
//! assert_eq!(engine.compile("half 9", &[]).unwrap().evaluate(), 4.5);
//! ```

pub mod engine;
pub mod environment;
pub mod error;
pub mod expression;
pub mod options;

pub use engine::Engine;
pub use environment::EnvironmentBuilder;
pub use error::{Diagnostic, Error};
pub use expression::CompiledExpression;
pub use options::{CompilationOptions, EngineOptions};

use crate::binding::{Binding, builtins};
use crate::evaluator;

/// Compile and evaluate in one go, with the built-in functions only.
///
/// Numeric problems are not errors: `interpret("1/0")` is `Ok(inf)`.
pub fn interpret(source: &str) -> Result<f64, Error> {
    let expr = compile(source, &[])?;
    Ok(expr.evaluate())
}

/// Compile a formula against caller bindings and the built-in functions.
///
/// The bindings are only borrowed for this call; the returned expression keeps
/// the references it resolved (variable cells, closures) for `'a`.
pub fn compile<'a>(
    source: &str,
    bindings: &[Binding<'a>],
) -> Result<CompiledExpression<'a>, Error> {
    Engine::compile_in(
        builtins::BUILTINS,
        &CompilationOptions::default(),
        source,
        bindings,
    )
}

/// Evaluate a compiled expression. `None` evaluates to NaN.
pub fn evaluate(expr: Option<&CompiledExpression<'_>>) -> f64 {
    evaluator::evaluate(expr.map(CompiledExpression::root))
}

/// Release a compiled expression. Releasing `None` does nothing.
///
/// Dropping the expression has the same effect; this exists for callers that
/// want the release to be explicit. The expression is moved in, so it cannot
/// be released twice.
pub fn release(expr: Option<CompiledExpression<'_>>) {
    drop(expr);
}
