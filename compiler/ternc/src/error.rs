//! Driver error.

use tern_diagnostic::{construction_error, Diagnostic};
use tern_eval::EvalError;
use tern_ir::{ConstructionError, StringInterner};

/// Why a module could not be checked or run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Rejected by the checker; nothing was executed.
    #[error("{0}")]
    Semantic(#[from] Diagnostic),
    /// Failed while executing.
    #[error("{0}")]
    Runtime(#[from] EvalError),
}

impl Error {
    /// A tree the front end could not build, reported like any other
    /// semantic error.
    pub fn construction(error: ConstructionError, interner: &StringInterner) -> Self {
        Error::Semantic(construction_error(error, interner))
    }

    pub fn as_semantic(&self) -> Option<&Diagnostic> {
        match self {
            Error::Semantic(diag) => Some(diag),
            Error::Runtime(_) => None,
        }
    }

    pub fn as_runtime(&self) -> Option<&EvalError> {
        match self {
            Error::Runtime(err) => Some(err),
            Error::Semantic(_) => None,
        }
    }
}
