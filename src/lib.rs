//! keycalc - a keypad calculator formula engine
//!
//! # Overview
//!
//! keycalc compiles short arithmetic formulas such as `2+3*4` or
//! `sqrt x^2 - 1` into expression trees that can be evaluated repeatedly
//! against caller-owned variables. It is built for calculator front ends:
//! keystrokes go into a [`Session`], the equals key evaluates the line.
//!
//! # Quick Start
//!
//! ```
//! use core::cell::Cell;
//! use keycalc::{Binding, compile, interpret};
//!
//! assert_eq!(interpret("2^3^2").unwrap(), 64.0);
//!
//! let x = Cell::new(3.0);
//! let expr = compile("x*x + 1", &[Binding::variable("x", &x)]).unwrap();
//! assert_eq!(expr.evaluate(), 10.0);
//! x.set(4.0);
//! assert_eq!(expr.evaluate(), 17.0);
//! ```
//!
//! # Errors
//!
//! Numeric problems are values, not errors: `1/0` is infinity and `1%0` is
//! NaN. Compile errors carry a 1-based offset and render with [`render_error`].
//!
//! ```
//! use keycalc::{interpret, render_error_to_string_no_color};
//!
//! let err = interpret("2+*3").unwrap_err();
//! assert_eq!(err.offset(), Some(3));
//! assert!(render_error_to_string_no_color(&err).contains("P005"));
//! ```

mod error_renderer;

pub use error_renderer::{
    render_error, render_error_to, render_error_to_string, render_error_to_string_no_color,
};

// Re-export public API from keycalc_core
pub use keycalc_core::api::{
    CompilationOptions, CompiledExpression, Diagnostic, Engine, EngineOptions, EnvironmentBuilder,
    Error, compile, evaluate, interpret, release,
};

pub use keycalc_core::ast::Node;
pub use keycalc_core::binding::{self, Binding, MAX_ARITY, NativeFn};
pub use keycalc_core::parser::{ParseError, ParseErrorKind};
pub use keycalc_core::session::{Session, SessionOptions};
