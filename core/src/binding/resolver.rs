use super::{Binding, builtins};

/// Resolves identifiers during a single compile call.
///
/// Caller bindings are scanned in order and the first exact match wins. Names
/// not bound by the caller fall back to the engine environment, a table sorted
/// by name.
#[derive(Clone, Copy)]
pub struct Resolver<'r, 'a> {
    bindings: &'r [Binding<'a>],
    environment: &'r [Binding<'a>],
}

impl<'r, 'a> Resolver<'r, 'a> {
    pub fn new(bindings: &'r [Binding<'a>], environment: &'r [Binding<'a>]) -> Self {
        Self {
            bindings,
            environment,
        }
    }

    /// A resolver that only knows the built-in functions.
    pub fn builtins_only() -> Resolver<'static, 'static> {
        Resolver::new(&[], builtins::BUILTINS)
    }

    pub fn resolve(&self, name: &str) -> Option<&'r Binding<'a>> {
        self.bindings
            .iter()
            .find(|binding| binding.name == name)
            .or_else(|| builtins::find_in(self.environment, name))
    }
}
