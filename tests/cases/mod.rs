#![allow(dead_code)]

use keycalc::{CompilationOptions, Engine};
use once_cell::sync::Lazy;

/// A formula, its unfolded tree and its value.
pub struct TestCase {
    pub name: &'static str,
    pub expr: &'static str,
    pub sexpr: &'static str,
    pub value: f64,
}

/// Formulas shared by tests that compare compilation modes.
pub static TEST_CASES: Lazy<Vec<TestCase>> = Lazy::new(|| {
    vec![
        TestCase {
            name: "precedence",
            expr: "2+3*4",
            sexpr: "(+ 2 (* 3 4))",
            value: 14.0,
        },
        TestCase {
            name: "power_chain",
            expr: "2^3^2",
            sexpr: "(^ (^ 2 3) 2)",
            value: 64.0,
        },
        TestCase {
            name: "sign_run",
            expr: "-+-5",
            sexpr: "5",
            value: 5.0,
        },
        TestCase {
            name: "function_of_power",
            expr: "sqrt 16^2",
            sexpr: "(^ (sqrt 16) 2)",
            value: 16.0,
        },
        TestCase {
            name: "division_by_zero",
            expr: "1/0",
            sexpr: "(/ 1 0)",
            value: f64::INFINITY,
        },
        TestCase {
            name: "modulo_by_zero",
            expr: "1%0",
            sexpr: "(% 1 0)",
            value: f64::NAN,
        },
        TestCase {
            name: "constants",
            expr: "2*pi - e",
            sexpr: "(- (* 2 (pi)) (e))",
            value: 2.0 * std::f64::consts::PI - std::f64::consts::E,
        },
    ]
});

pub fn unfolded_options() -> CompilationOptions {
    CompilationOptions {
        optimize: false,
        ..CompilationOptions::default()
    }
}

/// Compile without folding and render the tree.
pub fn sexpr(input: &str) -> String {
    Engine::default()
        .compile_with(&unfolded_options(), input, &[])
        .expect("compilation failed")
        .to_string()
}

/// Exact comparison that treats NaN as equal to NaN.
pub fn assert_value(actual: f64, expected: f64) {
    if expected.is_nan() {
        assert!(actual.is_nan(), "expected NaN, got {}", actual);
    } else {
        assert_eq!(actual, expected);
    }
}

#[macro_export]
macro_rules! test_case {
    (
        name: $name:ident,
        input: $input:expr,
        sexpr: $sexpr:expr,
        value: $value:expr $(,)?
    ) => {
        #[test]
        fn $name() {
            pretty_assertions::assert_eq!(cases::sexpr($input), $sexpr);
            let value = keycalc::interpret($input).expect("interpret failed");
            cases::assert_value(value, $value);
        }
    };
    (
        name: $name:ident,
        input: $input:expr,
        error: { offset: $offset:expr, code: $code:expr $(,)? } $(,)?
    ) => {
        #[test]
        fn $name() {
            let err = keycalc::interpret($input).expect_err("compilation should fail");
            assert_eq!(err.offset(), Some($offset));
            let diagnostic = err.diagnostic().expect("expected a compile error");
            assert_eq!(diagnostic.code.as_deref(), Some($code));
        }
    };
}
