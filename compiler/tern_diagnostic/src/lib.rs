//! Diagnostic system for semantic errors.
//!
//! Every static violation found by the checker is reported as one
//! [`Diagnostic`]:
//! - Error code for searchability
//! - Clear message (what went wrong)
//! - Primary span (where it went wrong)
//! - Secondary labels and notes (why it's wrong)
//!
//! Checking stops at the first diagnostic; there is no error accumulation.
//!
//! Internal invariant violations are not diagnostics. They go through
//! [`internal_error`], which aborts with an "internal compiler error".

mod diagnostic;
mod error_code;
mod internal;

pub use diagnostic::{construction_error, Diagnostic, Label};
pub use error_code::ErrorCode;
pub use internal::internal_error;
