//! Side table of inferred contexts.
//!
//! The checker records exactly one entry per checked node; the evaluator
//! reads them back. Both directions of misuse are internal errors.

use rustc_hash::FxHashMap;
use tern_diagnostic::internal_error;
use tern_ir::{Name, NodeId, PatternId};

use crate::Type;

/// Node-kind specific context beyond the node's type.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeDetail {
    None,
    /// Function definition: names to snapshot when the function value is
    /// created.
    Function { captures: Vec<Name> },
}

/// Inferred context of one node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeInfo {
    pub ty: Type,
    pub detail: NodeDetail,
}

/// Node id → inferred context, plus resolved pattern annotations.
#[derive(Default, Debug)]
pub struct TypeTable {
    nodes: FxHashMap<NodeId, NodeInfo>,
    annotations: FxHashMap<PatternId, Type>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a node's context.
    ///
    /// # Panics
    /// Internal error if the node was already recorded.
    pub fn record(&mut self, id: NodeId, info: NodeInfo) {
        if self.nodes.insert(id, info).is_some() {
            internal_error(format_args!("node {id:?} type-checked twice"));
        }
    }

    /// Record the resolved annotation of a bind pattern.
    pub fn record_annotation(&mut self, id: PatternId, ty: Type) {
        if self.annotations.insert(id, ty).is_some() {
            internal_error(format_args!("pattern {id:?} type-checked twice"));
        }
    }

    /// Context of a checked node.
    ///
    /// # Panics
    /// Internal error if the node was never checked.
    pub fn get(&self, id: NodeId) -> &NodeInfo {
        match self.nodes.get(&id) {
            Some(info) => info,
            None => internal_error(format_args!("node {id:?} executed before type checking")),
        }
    }

    /// Type of a checked node.
    pub fn type_of(&self, id: NodeId) -> &Type {
        &self.get(id).ty
    }

    /// Resolved annotation of a bind pattern, if it had one.
    pub fn annotation(&self, id: PatternId) -> Option<&Type> {
        self.annotations.get(&id)
    }

    /// Whether `id` has been checked.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of checked nodes.
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }
}
