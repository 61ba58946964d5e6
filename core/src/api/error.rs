//! Public error types for the keycalc API.
//!
//! Evaluation has no error type: numeric failures are NaN or infinity.

use crate::parser::ParseError;
use crate::syntax::Span;
use thiserror::Error;

/// Public error type for all keycalc operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid API usage (e.g. a binding name the lexer can never produce).
    #[error("API error: {0}")]
    Api(String),

    /// The formula did not parse.
    #[error("Compilation failed: {0}")]
    Compilation(#[from] ParseError),
}

impl Error {
    /// The failure offset of a compilation error: a byte offset into the
    /// source, never 0.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::Compilation(err) => Some(err.offset),
            Error::Api(_) => None,
        }
    }

    pub fn diagnostic(&self) -> Option<Diagnostic> {
        match self {
            Error::Compilation(err) => Some(err.to_diagnostic()),
            Error::Api(_) => None,
        }
    }
}

/// A compile error with its source location, ready for rendering.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Primary diagnostic message.
    pub message: String,

    /// Source location of the primary issue.
    pub span: Span,

    /// Optional help text suggesting how to fix the issue.
    pub help: Vec<String>,

    /// Optional error code (e.g., "P001") for documentation lookup.
    pub code: Option<String>,
}
