//! Compiler and evaluator for keypad calculator formulas.
//!
//! Formulas are compiled once into an owned expression tree, optionally
//! constant-folded, and evaluated any number of times against caller-owned
//! variables.

pub mod api;
pub mod ast;
pub mod binding;
pub mod evaluator;
pub mod lexer;
pub mod optimizer;
pub mod parser;
pub mod session;
pub mod syntax;

pub use api::{
    CompilationOptions, CompiledExpression, Engine, EngineOptions, Error, compile, evaluate,
    interpret, release,
};
pub use binding::Binding;
