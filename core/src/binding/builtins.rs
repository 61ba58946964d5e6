//! Built-in functions available to every formula.
//!
//! The table is searched with a binary search, so it must stay sorted by name.

use super::{Binding, BindingKind, Function};
use core::f64::consts;

macro_rules! builtin {
    ($name:literal, $arity:literal, $func:expr) => {
        Binding {
            name: $name,
            kind: BindingKind::Function(Function::native($name, $arity, $func).pure()),
        }
    };
}

/// Built-in functions, sorted by name.
///
/// A `const` rather than a `static`: closure callables are not `Sync`.
pub const BUILTINS: &[Binding<'static>] = &[
    builtin!("abs", 1, |args| args[0].abs()),
    builtin!("acos", 1, |args| args[0].acos()),
    builtin!("asin", 1, |args| args[0].asin()),
    builtin!("atan", 1, |args| args[0].atan()),
    builtin!("ceil", 1, |args| args[0].ceil()),
    builtin!("cos", 1, |args| args[0].cos()),
    builtin!("cosh", 1, |args| args[0].cosh()),
    builtin!("e", 0, |_| consts::E),
    builtin!("exp", 1, |args| args[0].exp()),
    builtin!("fac", 1, |args| factorial(args[0])),
    builtin!("floor", 1, |args| args[0].floor()),
    builtin!("ln", 1, |args| args[0].ln()),
    builtin!("log", 1, |args| args[0].log10()),
    builtin!("log10", 1, |args| args[0].log10()),
    builtin!("ncr", 2, |args| combinations(args[0], args[1])),
    builtin!("npr", 2, |args| permutations(args[0], args[1])),
    builtin!("pi", 0, |_| consts::PI),
    builtin!("pow", 2, |args| args[0].powf(args[1])),
    builtin!("sin", 1, |args| args[0].sin()),
    builtin!("sinh", 1, |args| args[0].sinh()),
    builtin!("sqrt", 1, |args| args[0].sqrt()),
    builtin!("tan", 1, |args| args[0].tan()),
    builtin!("tanh", 1, |args| args[0].tanh()),
];

/// Look up a built-in by exact, case-sensitive name.
pub fn find(name: &str) -> Option<&'static Binding<'static>> {
    find_in(BUILTINS, name)
}

/// Binary search in a table sorted by name.
pub(crate) fn find_in<'t, 'a>(table: &'t [Binding<'a>], name: &str) -> Option<&'t Binding<'a>> {
    debug_assert!(is_sorted(table), "binding table must be sorted by name");
    table
        .binary_search_by(|binding| binding.name.cmp(name))
        .ok()
        .map(|idx| &table[idx])
}

pub(crate) fn is_sorted(table: &[Binding<'_>]) -> bool {
    table.windows(2).all(|pair| pair[0].name < pair[1].name)
}

fn factorial(a: f64) -> f64 {
    if a.is_nan() || a < 0.0 {
        return f64::NAN;
    }
    if a > u32::MAX as f64 {
        return f64::INFINITY;
    }
    let n = a as u32;
    let mut result = 1.0;
    for i in 2..=n {
        result *= i as f64;
        if result.is_infinite() {
            break;
        }
    }
    result
}

fn combinations(n: f64, r: f64) -> f64 {
    if n.is_nan() || r.is_nan() || n < 0.0 || r < 0.0 || n < r {
        return f64::NAN;
    }
    if n > u32::MAX as f64 || r > u32::MAX as f64 {
        return f64::INFINITY;
    }
    let n = n as u32;
    let r = r as u32;
    let r = r.min(n - r);
    let mut result = 1.0;
    for i in 1..=r {
        result *= (n - r + i) as f64 / i as f64;
        if result.is_infinite() {
            break;
        }
    }
    result.round()
}

fn permutations(n: f64, r: f64) -> f64 {
    combinations(n, r) * factorial(r)
}
