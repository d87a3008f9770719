//! Internal invariant violations.

use crate::ErrorCode;

/// Abort on a broken internal invariant.
///
/// Reached only through bugs in this core: phase-ordering violations, a
/// side-table entry missing for a checked node, a binding that resolved
/// during type checking but not at runtime. These are never user errors and
/// never flow through `Result`s that user-facing handling could swallow.
#[cold]
#[track_caller]
pub fn internal_error(message: impl std::fmt::Display) -> ! {
    panic!("internal compiler error [{}]: {message}", ErrorCode::E9001)
}
