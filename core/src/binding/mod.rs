//! Named bindings that formulas can refer to.
//!
//! A binding associates an identifier with either a caller-owned numeric cell
//! (read every time an expression is evaluated) or a callable of fixed arity.
//! Bindings are borrowed for the duration of a compile call; only the resolved
//! references end up in the compiled tree.

pub mod builtins;
mod resolver;

pub use resolver::Resolver;

use crate::api::Error;
use core::cell::Cell;
use core::fmt;

/// Maximum number of arguments a bound function may take.
pub const MAX_ARITY: usize = 7;

/// Signature of native functions. The slice holds exactly `arity` arguments.
pub type NativeFn = fn(&[f64]) -> f64;

/// Something that can be invoked from a formula.
#[derive(Clone, Copy)]
pub enum Callable<'a> {
    /// A plain function pointer with no extra state.
    Native(NativeFn),

    /// A function together with caller-owned context.
    ///
    /// The context is whatever the closure captures. The tree only borrows it,
    /// so the caller keeps ownership and must keep it alive for `'a`.
    Closure(&'a dyn Fn(&[f64]) -> f64),
}

impl Callable<'_> {
    #[inline]
    pub fn call(&self, args: &[f64]) -> f64 {
        match self {
            Callable::Native(f) => f(args),
            Callable::Closure(f) => f(args),
        }
    }

    pub fn is_closure(&self) -> bool {
        matches!(self, Callable::Closure(_))
    }
}

impl fmt::Debug for Callable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callable::Native(func) => write!(f, "Native({:p})", *func as *const ()),
            Callable::Closure(_) => write!(f, "Closure(..)"),
        }
    }
}

/// A resolved function reference, as stored in call nodes.
#[derive(Debug, Clone, Copy)]
pub struct Function<'a> {
    pub name: &'a str,
    pub callable: Callable<'a>,
    pub arity: usize,
    /// Result depends only on the arguments, so constant calls may be folded.
    pub pure: bool,
}

impl<'a> Function<'a> {
    pub const fn native(name: &'a str, arity: usize, func: NativeFn) -> Self {
        Self {
            name,
            callable: Callable::Native(func),
            arity,
            pure: false,
        }
    }

    pub const fn pure(mut self) -> Self {
        self.pure = true;
        self
    }

    #[inline]
    pub fn call(&self, args: &[f64]) -> f64 {
        self.callable.call(args)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum BindingKind<'a> {
    Variable(&'a Cell<f64>),
    Function(Function<'a>),
}

/// A caller-declared name usable in formulas.
///
/// # Example
///
/// ```
/// use core::cell::Cell;
/// use keycalc_core::binding::Binding;
///
/// let x = Cell::new(2.0);
/// let scale = 10.0;
/// let scaled = |args: &[f64]| args[0] * scale;
///
/// let bindings = [
///     Binding::variable("x", &x),
///     Binding::function("half", 1, |args| args[0] / 2.0).pure(),
///     Binding::closure("scaled", 1, &scaled),
/// ];
/// assert_eq!(bindings.len(), 3);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Binding<'a> {
    pub name: &'a str,
    pub kind: BindingKind<'a>,
}

impl<'a> Binding<'a> {
    pub const fn variable(name: &'a str, cell: &'a Cell<f64>) -> Self {
        Self {
            name,
            kind: BindingKind::Variable(cell),
        }
    }

    pub const fn function(name: &'a str, arity: usize, func: NativeFn) -> Self {
        Self {
            name,
            kind: BindingKind::Function(Function::native(name, arity, func)),
        }
    }

    pub fn closure(name: &'a str, arity: usize, func: &'a dyn Fn(&[f64]) -> f64) -> Self {
        Self {
            name,
            kind: BindingKind::Function(Function {
                name,
                callable: Callable::Closure(func),
                arity,
                pure: false,
            }),
        }
    }

    /// Mark a function binding as pure. No effect on variables.
    pub const fn pure(mut self) -> Self {
        if let BindingKind::Function(ref mut function) = self.kind {
            function.pure = true;
        }
        self
    }

    /// Check that the lexer can reach this name and that the arity is supported.
    pub fn validate(&self) -> Result<(), Error> {
        if !is_identifier(self.name) {
            return Err(Error::Api(format!(
                "Invalid binding name '{}': expected a lowercase letter followed by lowercase letters, digits or '_'",
                self.name
            )));
        }
        if let BindingKind::Function(function) = &self.kind {
            if function.arity > MAX_ARITY {
                return Err(Error::Api(format!(
                    "Function '{}' takes {} arguments, at most {} are supported",
                    self.name, function.arity, MAX_ARITY
                )));
            }
        }
        Ok(())
    }
}

pub(crate) fn is_identifier_start(c: u8) -> bool {
    c.is_ascii_lowercase()
}

pub(crate) fn is_identifier_continue(c: u8) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == b'_'
}

fn is_identifier(name: &str) -> bool {
    let bytes = name.as_bytes();
    match bytes.split_first() {
        Some((first, rest)) => {
            is_identifier_start(*first) && rest.iter().all(|c| is_identifier_continue(*c))
        }
        None => false,
    }
}
