use crate::api::Diagnostic;
use crate::syntax::Span;
use thiserror::Error;

/// Reason a formula failed to compile.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseErrorKind {
    #[error("unexpected character '{ch}'")]
    UnexpectedCharacter { ch: char },

    #[error("invalid number literal '{text}'")]
    InvalidNumber { text: String },

    #[error("unknown identifier '{name}'")]
    UnknownIdentifier { name: String },

    #[error("function '{name}' takes {arity} arguments, only functions of zero or one argument can be called")]
    UnsupportedArity { name: String, arity: usize },

    #[error("expected a number, variable or function, found {found}")]
    UnexpectedToken { found: String },

    #[error("expected an operator or end of input, found {found}")]
    TrailingInput { found: String },

    #[error("expression nesting depth exceeds maximum of {max_depth} levels")]
    MaxDepthExceeded { max_depth: usize },
}

impl ParseErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            ParseErrorKind::UnexpectedCharacter { .. } => "P001",
            ParseErrorKind::InvalidNumber { .. } => "P002",
            ParseErrorKind::UnknownIdentifier { .. } => "P003",
            ParseErrorKind::UnsupportedArity { .. } => "P004",
            ParseErrorKind::UnexpectedToken { .. } => "P005",
            ParseErrorKind::TrailingInput { .. } => "P006",
            ParseErrorKind::MaxDepthExceeded { .. } => "P007",
        }
    }

    fn help(&self) -> Option<String> {
        match self {
            ParseErrorKind::UnexpectedCharacter { .. } => {
                Some("operators are + - * / ^ %".to_string())
            }
            ParseErrorKind::UnknownIdentifier { .. } => {
                Some("bind the name as a variable or function before compiling".to_string())
            }
            ParseErrorKind::MaxDepthExceeded { .. } => {
                Some("reduce nesting or simplify the expression".to_string())
            }
            _ => None,
        }
    }
}

/// A failed compile: what went wrong and where.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} at offset {offset}")]
pub struct ParseError {
    pub kind: ParseErrorKind,

    /// Byte offset of the lexer cursor when parsing stopped. Never 0, so that
    /// a failure is always distinguishable from success.
    pub offset: usize,

    /// The offending token, for rendering.
    pub span: Span,

    pub src: String,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, cursor: usize, span: Span, src: &str) -> Self {
        Self {
            kind,
            offset: cursor.max(1),
            span,
            src: src.to_string(),
        }
    }

    /// Convert to a Diagnostic for the API boundary.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic {
            message: self.kind.to_string(),
            span: self.span.clone(),
            help: self.kind.help().into_iter().collect(),
            code: Some(self.kind.code().to_string()),
        }
    }
}
