//! Runtime identifier bindings.
//!
//! Bindings live in one flat vector scanned back-to-front, so the innermost
//! binding of a name wins. Scopes are marks into that vector: popping a
//! scope truncates back to its mark. Globals (the standard library) sit
//! behind every scope and are shared between all environments of a run.

use std::rc::Rc;

use rustc_hash::FxHashMap;
use tern_ir::Name;

use crate::Value;

/// Standard-library bindings visible everywhere.
pub type Globals = FxHashMap<Name, Value>;

/// Environment for one function activation or module body.
///
/// Each call builds a fresh environment from the closure's captures and its
/// parameters; nothing of the caller's environment is visible.
pub struct Environment {
    bindings: Vec<(Name, Value)>,
    /// Start index of each open scope.
    scopes: Vec<usize>,
    globals: Rc<Globals>,
}

impl Environment {
    pub fn new(globals: Rc<Globals>) -> Self {
        Environment {
            bindings: Vec::new(),
            scopes: Vec::new(),
            globals,
        }
    }

    /// Shared globals, for building a callee's environment.
    pub fn globals(&self) -> &Rc<Globals> {
        &self.globals
    }

    #[inline]
    pub fn push_scope(&mut self) {
        self.scopes.push(self.bindings.len());
    }

    /// Drop every binding made since the matching `push_scope`.
    #[inline]
    pub fn pop_scope(&mut self) {
        if let Some(mark) = self.scopes.pop() {
            self.bindings.truncate(mark);
        }
    }

    #[inline]
    pub fn define(&mut self, name: Name, value: Value) {
        self.bindings.push((name, value));
    }

    /// Bind every `(name, value)` pair, in order.
    pub fn define_all(&mut self, bindings: impl IntoIterator<Item = (Name, Value)>) {
        self.bindings.extend(bindings);
    }

    pub fn lookup(&self, name: Name) -> Option<&Value> {
        self.bindings
            .iter()
            .rev()
            .find_map(|(n, v)| (*n == name).then_some(v))
            .or_else(|| self.globals.get(&name))
    }

    /// Number of open scopes.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }
}
