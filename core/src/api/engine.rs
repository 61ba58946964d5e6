//! The keycalc compilation engine.

use super::{CompilationOptions, CompiledExpression, EngineOptions, EnvironmentBuilder, Error};
use crate::binding::{Binding, Resolver};
use crate::{optimizer, parser};
use tracing::debug;

/// The keycalc compilation engine.
///
/// The engine holds:
/// - The environment (built-in functions plus engine-wide bindings)
/// - Default compilation options
///
/// # Lifetimes
///
/// - `'env`: Lifetime of the state referenced by engine-wide bindings
///   (variable cells, closures). Compiled expressions may borrow it.
///
/// # Example
///
/// ```
/// use keycalc_core::api::{Engine, EngineOptions};
/// use keycalc_core::binding::Binding;
///
/// let offset = 100.0;
/// let shift = |args: &[f64]| args[0] + offset;
///
/// let engine = Engine::new(EngineOptions::default(), |env| {
///     env.register(Binding::closure("shift", 1, &shift))
/// })
/// .unwrap();
///
/// let expr = engine.compile("shift 1 * 2", &[]).unwrap();
/// assert_eq!(expr.evaluate(), 202.0);
/// ```
pub struct Engine<'env> {
    environment: Vec<Binding<'env>>,
    options: EngineOptions,
}

impl<'env> Engine<'env> {
    /// Create a new engine with a custom environment.
    ///
    /// The initialization closure registers engine-wide bindings. Its first
    /// error aborts construction.
    pub fn new(
        options: EngineOptions,
        init: impl FnOnce(&mut EnvironmentBuilder<'env>) -> Result<(), Error>,
    ) -> Result<Self, Error> {
        let mut env_builder = EnvironmentBuilder::new();
        init(&mut env_builder)?;
        let environment = env_builder.build();
        debug!(bindings = environment.len(), "Engine environment built");

        Ok(Self {
            environment,
            options,
        })
    }

    /// Access the environment, sorted by name.
    pub fn environment(&self) -> &[Binding<'env>] {
        &self.environment
    }

    /// Access the engine options.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Compile a formula with the engine's default options.
    ///
    /// `bindings` take precedence over the environment. They are only
    /// borrowed for this call.
    pub fn compile<'a>(
        &self,
        source: &str,
        bindings: &[Binding<'a>],
    ) -> Result<CompiledExpression<'a>, Error>
    where
        'env: 'a,
    {
        self.compile_with(&self.options.default_compilation_options, source, bindings)
    }

    /// Compile a formula with explicit options.
    pub fn compile_with<'a>(
        &self,
        options: &CompilationOptions,
        source: &str,
        bindings: &[Binding<'a>],
    ) -> Result<CompiledExpression<'a>, Error>
    where
        'env: 'a,
    {
        Self::compile_in(&self.environment, options, source, bindings)
    }

    pub(crate) fn compile_in<'a>(
        environment: &[Binding<'a>],
        options: &CompilationOptions,
        source: &str,
        bindings: &[Binding<'a>],
    ) -> Result<CompiledExpression<'a>, Error> {
        for binding in bindings {
            binding.validate()?;
        }

        debug!(source, bindings = bindings.len(), "Compiling");
        let resolver = Resolver::new(bindings, environment);
        let mut root = parser::parse_with_max_depth(source, resolver, options.max_depth)?;

        if options.optimize {
            let before = root.node_count();
            optimizer::optimize(&mut root);
            debug!(before, after = root.node_count(), "Folded constants");
        }

        Ok(CompiledExpression::new(root, source))
    }
}

impl Default for Engine<'_> {
    /// An engine with the built-in functions only.
    fn default() -> Self {
        Self {
            environment: EnvironmentBuilder::new().build(),
            options: EngineOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ParseErrorKind;
    use crate::test_utils::init_test_logging;
    use core::cell::Cell;

    #[test]
    fn test_default_engine_has_builtins() {
        let engine = Engine::default();
        assert_eq!(engine.compile("sqrt 16", &[]).unwrap().evaluate(), 4.0);
        assert!(engine.options().default_compilation_options.optimize);
    }

    #[test]
    fn test_call_bindings_shadow_environment() {
        let engine_x = Cell::new(1.0);
        let call_x = Cell::new(2.0);
        let engine = Engine::new(EngineOptions::default(), |env| {
            env.register(Binding::variable("x", &engine_x))
        })
        .unwrap();

        assert_eq!(engine.compile("x", &[]).unwrap().evaluate(), 1.0);
        let bindings = [Binding::variable("x", &call_x)];
        assert_eq!(engine.compile("x", &bindings).unwrap().evaluate(), 2.0);
    }

    #[test]
    fn test_registered_function_replaces_builtin() {
        let engine = Engine::new(EngineOptions::default(), |env| {
            env.register(Binding::function("sqrt", 1, |args| args[0] + 1.0))
        })
        .unwrap();
        assert_eq!(engine.compile("sqrt 16", &[]).unwrap().evaluate(), 17.0);
    }

    #[test]
    fn test_init_error_aborts() {
        let result = Engine::new(EngineOptions::default(), |env| {
            env.register(Binding::function("two words", 1, |args| args[0]))
        });
        assert!(matches!(result, Err(Error::Api(_))));
    }

    #[test]
    fn test_engine_defaults_apply() {
        init_test_logging();
        let options = EngineOptions {
            default_compilation_options: CompilationOptions {
                optimize: false,
                max_depth: 2,
            },
        };
        let engine = Engine::new(options, |_| Ok(())).unwrap();

        let expr = engine.compile("1+1", &[]).unwrap();
        assert_eq!(expr.node_count(), 3);

        let err = engine.compile("abs abs abs 1", &[]).unwrap_err();
        match err {
            Error::Compilation(err) => {
                assert_eq!(err.kind, ParseErrorKind::MaxDepthExceeded { max_depth: 2 })
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_impure_call_is_not_folded() {
        let calls = Cell::new(0.0);
        let tick = |_: &[f64]| {
            calls.set(calls.get() + 1.0);
            calls.get()
        };
        let bindings = [Binding::closure("tick", 0, &tick)];
        let engine = Engine::default();
        let expr = engine.compile("tick + 1", &bindings).unwrap();
        assert_eq!(expr.evaluate(), 2.0);
        assert_eq!(expr.evaluate(), 3.0);
    }
}
