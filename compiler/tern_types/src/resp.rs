//! Results flowing back up the tree while checking.

use tern_ir::{Name, Span};

use crate::Type;

/// A reference to a binding owned by an enclosing function level.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct CapturedVar {
    pub name: Name,
    /// Function depth that owns the binding.
    pub depth: u32,
}

/// A binding introduced by a `let`, `import`, or pattern.
#[derive(Clone, Debug)]
pub struct Declaration {
    pub name: Name,
    pub ty: Type,
    pub span: Span,
}

/// Per-node check result.
///
/// Merging concatenates each field; captured variables are deduplicated.
#[derive(Clone, Debug, Default)]
pub struct RespState {
    pub outer_scope_vars: Vec<CapturedVar>,
    pub return_types: Vec<(Type, Span)>,
    pub declarations: Vec<Declaration>,
}

impl RespState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capture(&mut self, name: Name, depth: u32) {
        let var = CapturedVar { name, depth };
        if !self.outer_scope_vars.contains(&var) {
            self.outer_scope_vars.push(var);
        }
    }

    pub fn declare(&mut self, name: Name, ty: Type, span: Span) {
        self.declarations.push(Declaration { name, ty, span });
    }

    pub fn add_return(&mut self, ty: Type, span: Span) {
        self.return_types.push((ty, span));
    }

    /// Append `other` to `self`.
    pub fn merge(&mut self, other: RespState) {
        for var in other.outer_scope_vars {
            self.capture(var.name, var.depth);
        }
        self.return_types.extend(other.return_types);
        self.declarations.extend(other.declarations);
    }

    /// Merge everything except declarations, which stay in the scope that
    /// produced them.
    pub fn merge_scoped(&mut self, mut other: RespState) {
        other.declarations.clear();
        self.merge(other);
    }

    #[must_use]
    pub fn merged(mut self, other: RespState) -> Self {
        self.merge(other);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn name(raw: u32) -> Name {
        Name::from_raw(raw)
    }

    #[test]
    fn merge_dedups_captures_and_keeps_order() {
        let mut a = RespState::new();
        a.capture(name(1), 0);
        a.add_return(Type::int(), Span::new(0, 1));
        let mut b = RespState::new();
        b.capture(name(2), 1);
        b.capture(name(1), 0);
        b.add_return(Type::string(), Span::new(2, 3));

        a.merge(b);
        assert_eq!(
            a.outer_scope_vars,
            vec![
                CapturedVar { name: name(1), depth: 0 },
                CapturedVar { name: name(2), depth: 1 },
            ]
        );
        assert_eq!(a.return_types.len(), 2);
    }

    #[test]
    fn merge_is_associative() {
        let mk = |n: u32| {
            let mut r = RespState::new();
            r.capture(name(n), 0);
            r.declare(name(n + 10), Type::int(), Span::DUMMY);
            r
        };
        let left = mk(1).merged(mk(2)).merged(mk(1));
        let right = mk(1).merged(mk(2).merged(mk(1)));
        assert_eq!(left.outer_scope_vars, right.outer_scope_vars);
        let names = |r: &RespState| r.declarations.iter().map(|d| d.name).collect::<Vec<_>>();
        assert_eq!(names(&left), names(&right));
    }

    #[test]
    fn scoped_merge_drops_declarations() {
        let mut outer = RespState::new();
        let mut inner = RespState::new();
        inner.declare(name(3), Type::int(), Span::DUMMY);
        inner.capture(name(4), 0);
        outer.merge_scoped(inner);
        assert!(outer.declarations.is_empty());
        assert_eq!(outer.outer_scope_vars.len(), 1);
    }
}
