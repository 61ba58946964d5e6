//! Environment builder for registering engine-wide bindings.

use super::Error;
use crate::binding::{Binding, builtins};
use tracing::trace;

/// Builder for the engine environment.
///
/// The environment starts out with the built-in functions. Bindings registered
/// here are visible to every expression compiled with the engine, below the
/// per-call bindings.
///
/// # Example
///
/// ```
/// use core::cell::Cell;
/// use keycalc_core::api::{Engine, EngineOptions};
/// use keycalc_core::binding::Binding;
///
/// let rate = Cell::new(0.2);
/// let engine = Engine::new(EngineOptions::default(), |env| {
///     env.register(Binding::variable("rate", &rate))
/// })
/// .unwrap();
/// assert_eq!(engine.compile("100*rate", &[]).unwrap().evaluate(), 20.0);
/// ```
pub struct EnvironmentBuilder<'env> {
    entries: Vec<Binding<'env>>,
}

impl<'env> EnvironmentBuilder<'env> {
    /// Create a builder holding the built-in functions.
    pub fn new() -> Self {
        Self {
            entries: builtins::BUILTINS.to_vec(),
        }
    }

    /// Register an engine-wide binding.
    ///
    /// A binding with the name of an existing entry (built-in or previously
    /// registered) replaces it.
    pub fn register(&mut self, binding: Binding<'env>) -> Result<(), Error> {
        binding.validate()?;
        match self.entries.iter_mut().find(|entry| entry.name == binding.name) {
            Some(entry) => {
                trace!(name = binding.name, "Replacing environment binding");
                *entry = binding;
            }
            None => {
                trace!(name = binding.name, "Registering environment binding");
                self.entries.push(binding);
            }
        }
        Ok(())
    }

    /// Build the final environment, sorted by name for binary search.
    pub(crate) fn build(mut self) -> Vec<Binding<'env>> {
        self.entries.sort_by_key(|binding| binding.name);
        self.entries
    }
}

impl Default for EnvironmentBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}
