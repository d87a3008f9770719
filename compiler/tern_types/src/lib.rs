//! Type system for Tern.
//!
//! - [`Type`]: concrete types (primitives, records, functions) and generic
//!   parameter types identified by [`GenericId`]
//! - [`is_assignable`] / [`widest`]: structural comparison with width
//!   subtyping, variance-aware function comparison, and purity ordering
//! - [`TypeFolder`] / [`align_types`]: substitution and generic alignment
//! - [`TypeState`] / [`RespState`]: scope state threaded down the tree and
//!   results flowing back up
//! - [`check_module`]: the single type-check pass, which fills a
//!   [`TypeTable`] consumed by the evaluator
//!
//! Types are immutable and share structure through `Rc`; a whole
//! compilation runs on one thread.

mod assign;
mod check;
mod format;
mod resp;
mod state;
mod table;
mod traverse;
mod ty;

pub use assign::{is_assignable, widest};
pub use check::{check_module, CheckedModule, ImportResolver};
pub use format::TypeDisplay;
pub use resp::{CapturedVar, Declaration, RespState};
pub use state::{TypeFactory, TypeState, VarEntry};
pub use table::{NodeDetail, NodeInfo, TypeTable};
pub use traverse::{align_types, substitute, Substitution, TypeFolder, Variance};
pub use ty::{
    ConcreteType, FunctionType, GenericId, GenericIdGen, ParamType, RecordType, Type, TypeKind,
};

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::GenericId;
    tern_ir::static_assert_size!(GenericId, 4);
}
