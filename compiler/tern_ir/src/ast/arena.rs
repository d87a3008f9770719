//! Arena storage for one module's syntax tree.

use std::fmt;

use rustc_hash::FxHashMap;

use super::{
    FieldInit, FieldPattern, FieldType, Node, NodeId, NodeKind, Pattern, PatternId, PatternKind,
    TypeExpr, TypeExprId, TypeExprKind,
};
use crate::{Name, Span};

/// Error raised while constructing a node whose shape is invalid regardless
/// of types.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConstructionError {
    /// A record literal repeats a key.
    DuplicateRecordKey { name: Name, first: Span, second: Span },
    /// A record pattern repeats a field.
    DuplicatePatternField { name: Name, first: Span, second: Span },
    /// A record type expression repeats a field.
    DuplicateTypeField { name: Name, first: Span, second: Span },
}

impl ConstructionError {
    /// Name that was repeated.
    pub fn name(&self) -> Name {
        match *self {
            ConstructionError::DuplicateRecordKey { name, .. }
            | ConstructionError::DuplicatePatternField { name, .. }
            | ConstructionError::DuplicateTypeField { name, .. } => name,
        }
    }
}

impl fmt::Display for ConstructionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self {
            ConstructionError::DuplicateRecordKey { .. } => "record key",
            ConstructionError::DuplicatePatternField { .. } => "pattern field",
            ConstructionError::DuplicateTypeField { .. } => "record type field",
        };
        write!(f, "duplicate {what} {:?}", self.name())
    }
}

impl std::error::Error for ConstructionError {}

/// Syntax tree of one module.
///
/// Produced once by the front end. The checker and the evaluator both borrow
/// it; neither mutates it.
#[derive(Clone, Debug, Default)]
pub struct Ast {
    nodes: Vec<Node>,
    patterns: Vec<Pattern>,
    type_exprs: Vec<TypeExpr>,
    /// Top-level statements in source order.
    module: Vec<NodeId>,
}

fn next_index(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

/// Find the first repeated name, returning it with both spans.
fn find_duplicate(entries: impl Iterator<Item = (Name, Span)>) -> Option<(Name, Span, Span)> {
    let mut seen: FxHashMap<Name, Span> = FxHashMap::default();
    for (name, span) in entries {
        if let Some(&first) = seen.get(&name) {
            return Some((name, first, span));
        }
        seen.insert(name, span);
    }
    None
}

impl Ast {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a node. Record literals with a repeated key are rejected.
    pub fn alloc_node(
        &mut self,
        kind: NodeKind,
        span: Span,
    ) -> Result<NodeId, ConstructionError> {
        if let NodeKind::Record(fields) = &kind {
            if let Some((name, first, second)) =
                find_duplicate(fields.iter().map(|f| (f.name, f.span)))
            {
                return Err(ConstructionError::DuplicateRecordKey {
                    name,
                    first,
                    second,
                });
            }
        }
        Ok(self.push_node(kind, span))
    }

    /// Allocate a record literal, rejecting duplicate keys.
    pub fn alloc_record(
        &mut self,
        fields: Vec<FieldInit>,
        span: Span,
    ) -> Result<NodeId, ConstructionError> {
        self.alloc_node(NodeKind::Record(fields), span)
    }

    /// Append without validation.
    pub(crate) fn push_node(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let id = NodeId::from_raw(next_index(self.nodes.len()));
        self.nodes.push(Node { kind, span });
        id
    }

    /// Allocate a pattern. Record patterns with a repeated field are
    /// rejected.
    pub fn alloc_pattern(
        &mut self,
        kind: PatternKind,
        span: Span,
    ) -> Result<PatternId, ConstructionError> {
        if let PatternKind::Record(fields) = &kind {
            let spans: Vec<(Name, Span)> = fields
                .iter()
                .map(|f| (f.name, self.pattern(f.pattern).span))
                .collect();
            if let Some((name, first, second)) = find_duplicate(spans.into_iter()) {
                return Err(ConstructionError::DuplicatePatternField {
                    name,
                    first,
                    second,
                });
            }
        }
        Ok(self.push_pattern(kind, span))
    }

    /// Allocate a record destructuring pattern, rejecting duplicate fields.
    pub fn alloc_record_pattern(
        &mut self,
        fields: Vec<FieldPattern>,
        span: Span,
    ) -> Result<PatternId, ConstructionError> {
        self.alloc_pattern(PatternKind::Record(fields), span)
    }

    /// Append without validation.
    pub(crate) fn push_pattern(&mut self, kind: PatternKind, span: Span) -> PatternId {
        let id = PatternId::from_raw(next_index(self.patterns.len()));
        self.patterns.push(Pattern { kind, span });
        id
    }

    /// Allocate a type expression. Record types with a repeated field are
    /// rejected.
    pub fn alloc_type(
        &mut self,
        kind: TypeExprKind,
        span: Span,
    ) -> Result<TypeExprId, ConstructionError> {
        if let TypeExprKind::Record(fields) = &kind {
            let spans: Vec<(Name, Span)> = fields
                .iter()
                .map(|f| (f.name, self.type_expr(f.ty).span))
                .collect();
            if let Some((name, first, second)) = find_duplicate(spans.into_iter()) {
                return Err(ConstructionError::DuplicateTypeField {
                    name,
                    first,
                    second,
                });
            }
        }
        Ok(self.push_type(kind, span))
    }

    /// Allocate a record type expression, rejecting duplicate fields.
    pub fn alloc_record_type(
        &mut self,
        fields: Vec<FieldType>,
        span: Span,
    ) -> Result<TypeExprId, ConstructionError> {
        self.alloc_type(TypeExprKind::Record(fields), span)
    }

    /// Append without validation.
    pub(crate) fn push_type(&mut self, kind: TypeExprKind, span: Span) -> TypeExprId {
        let id = TypeExprId::from_raw(next_index(self.type_exprs.len()));
        self.type_exprs.push(TypeExpr { kind, span });
        id
    }

    /// Set the module's top-level statements.
    pub fn set_module(&mut self, statements: Vec<NodeId>) {
        self.module = statements;
    }

    /// Top-level statements in source order.
    pub fn module(&self) -> &[NodeId] {
        &self.module
    }

    /// Get a node.
    ///
    /// # Panics
    /// Panics if `id` was not allocated by this arena.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Get a pattern.
    ///
    /// # Panics
    /// Panics if `id` was not allocated by this arena.
    #[inline]
    pub fn pattern(&self, id: PatternId) -> &Pattern {
        &self.patterns[id.index()]
    }

    /// Get a type expression.
    ///
    /// # Panics
    /// Panics if `id` was not allocated by this arena.
    #[inline]
    pub fn type_expr(&self, id: TypeExprId) -> &TypeExpr {
        &self.type_exprs[id.index()]
    }

    /// Number of allocated nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of allocated patterns.
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }
}

#[cfg(test)]
mod tests;
