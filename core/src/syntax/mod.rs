//! Syntax structures shared by the lexer, parser and diagnostics.

pub mod number_literal;

use crate::binding::Function;
use core::fmt;
use core::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span(pub Range<usize>);

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self(start..end)
    }
    pub fn combine(a: &Span, b: &Span) -> Span {
        Span::new(a.0.start, b.0.end)
    }
    pub fn str_of<'a>(&self, source: &'a str) -> &'a str {
        &source[self.0.start..self.0.end]
    }
}

/// The single-character infix operators.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InfixOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Mod,
}

impl InfixOp {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(InfixOp::Add),
            '-' => Some(InfixOp::Sub),
            '*' => Some(InfixOp::Mul),
            '/' => Some(InfixOp::Div),
            '^' => Some(InfixOp::Pow),
            '%' => Some(InfixOp::Mod),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            InfixOp::Add => "+",
            InfixOp::Sub => "-",
            InfixOp::Mul => "*",
            InfixOp::Div => "/",
            InfixOp::Pow => "^",
            InfixOp::Mod => "%",
        }
    }

    /// Apply the operator with IEEE 754 semantics (inf/nan, never a panic).
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            InfixOp::Add => left + right,
            InfixOp::Sub => left - right,
            InfixOp::Mul => left * right,
            InfixOp::Div => left / right,
            InfixOp::Pow => left.powf(right),
            // Same as C's fmod: the sign follows the dividend, x % 0 is NaN.
            InfixOp::Mod => left % right,
        }
    }

    /// The pure two-argument function a call node uses for this operator.
    pub fn function(self) -> Function<'static> {
        let func: fn(&[f64]) -> f64 = match self {
            InfixOp::Add => |args| InfixOp::Add.apply(args[0], args[1]),
            InfixOp::Sub => |args| InfixOp::Sub.apply(args[0], args[1]),
            InfixOp::Mul => |args| InfixOp::Mul.apply(args[0], args[1]),
            InfixOp::Div => |args| InfixOp::Div.apply(args[0], args[1]),
            InfixOp::Pow => |args| InfixOp::Pow.apply(args[0], args[1]),
            InfixOp::Mod => |args| InfixOp::Mod.apply(args[0], args[1]),
        };
        Function::native(self.symbol(), 2, func).pure()
    }
}

impl fmt::Display for InfixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Unary minus, produced by an odd run of `-` signs.
pub fn negate() -> Function<'static> {
    Function::native("neg", 1, |args| -args[0]).pure()
}
