//! Configuration options for the keycalc engine.

use crate::parser::DEFAULT_MAX_DEPTH;

/// Configuration options for compilation.
///
/// # Example
///
/// ```
/// use keycalc_core::api::CompilationOptions;
///
/// let options = CompilationOptions {
///     optimize: false,
///     ..CompilationOptions::default()
/// };
/// assert_eq!(options.max_depth, 1000);
/// ```
#[derive(Debug, Clone)]
pub struct CompilationOptions {
    /// Fold constant subtrees after parsing.
    ///
    /// Default: true
    pub optimize: bool,

    /// Maximum nesting of function applications (`sin cos tan x` is 3).
    ///
    /// Default: 1000
    pub max_depth: usize,
}

impl Default for CompilationOptions {
    fn default() -> Self {
        Self {
            optimize: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Configuration options for the keycalc engine.
///
/// These set the defaults for compilation, which can be overridden on a
/// per-call basis with `Engine::compile_with`.
#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    pub default_compilation_options: CompilationOptions,
}
