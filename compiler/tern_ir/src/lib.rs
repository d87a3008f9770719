//! Tern IR - syntax tree and shared primitives.
//!
//! This crate contains the data the front end hands to the checker and the
//! evaluator:
//! - Spans for source locations
//! - Names for interned identifiers
//! - The AST arena (nodes, assignment-target patterns, type expressions)
//! - Purity levels and call permissions
//! - Debug-output behaviors shared by both phases
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: Strings → `Name(u32)`
//! - **Flatten Everything**: No `Box<Node>`, children are `NodeId(u32)` indices
//! - **Closed node kinds**: every node kind is an enum variant, so the checker
//!   and the evaluator match exhaustively

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod ast;
mod behaviors;
pub mod build;
mod interner;
mod name;
mod purity;
mod span;

pub use ast::{
    Ast, BinaryOp, CallExpr, ConstructionError, FieldInit, FieldPattern, FieldType, FunctionDef,
    GenericParam, MatchArm, Node, NodeId, NodeKind, Pattern, PatternId, PatternKind, TypeExpr,
    TypeExprId, TypeExprKind, UnaryOp,
};
pub use behaviors::{
    buffer_handler, silent_handler, stdout_handler, BufferDebugHandler, DebugHandler,
    SharedDebugHandler,
};
pub use build::AstBuilder;
pub use interner::{SharedInterner, StringInterner};
pub use name::Name;
pub use purity::Purity;
pub use span::Span;
