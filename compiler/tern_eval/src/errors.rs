//! Runtime error types.
//!
//! `EvalErrorKind` carries the structured category; factory functions
//! (e.g. `division_by_zero()`) are the public way to build errors and fill in
//! both `kind` and `message`.

use std::fmt;

use tern_ir::Span;

use crate::Value;

/// Result of evaluating to a value.
pub type EvalResult = Result<Value, EvalError>;

/// Failure codes a program can observe.
///
/// Only refutable constructs produce these; arithmetic faults and resource
/// exhaustion have none.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FailureCode {
    /// A `where` condition evaluated to `false`.
    PatternConstraintFailed,
    /// No `match` arm accepted the scrutinee.
    NoMatchingArm,
    /// An `as` assertion found an incompatible value.
    TypeAssertionFailed,
}

impl FailureCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PatternConstraintFailed => "PatternConstraintFailed",
            Self::NoMatchingArm => "NoMatchingArm",
            Self::TypeAssertionFailed => "TypeAssertionFailed",
        }
    }
}

impl fmt::Display for FailureCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed runtime error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Arithmetic
    DivisionByZero,
    IntegerOverflow {
        operation: &'static str,
    },

    // Resources
    StackOverflow {
        depth: usize,
    },

    // Refutable constructs
    PatternConstraintFailed,
    NoMatchingArm,
    TypeAssertionFailed {
        expected: String,
        found: String,
    },

    /// Raised by host functions supplied through the standard library.
    Custom {
        message: String,
    },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::IntegerOverflow { operation } => {
                write!(f, "integer overflow in {operation}")
            }
            Self::StackOverflow { depth } => {
                write!(f, "maximum call depth exceeded (limit: {depth})")
            }
            Self::PatternConstraintFailed => write!(f, "pattern constraint not satisfied"),
            Self::NoMatchingArm => write!(f, "no match arm accepted the value"),
            Self::TypeAssertionFailed { expected, found } => {
                write!(f, "type assertion failed: expected `{expected}`, found `{found}`")
            }
            Self::Custom { message } => write!(f, "{message}"),
        }
    }
}

/// Runtime error.
#[derive(Clone, Debug)]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// Human-readable message.
    pub message: String,
    /// Location of the failing node, once known.
    pub span: Option<Span>,
}

impl EvalError {
    /// Create an uncategorized error (host functions).
    #[cold]
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: EvalErrorKind::Custom {
                message: message.clone(),
            },
            message,
            span: None,
        }
    }

    /// Create an error from a kind; the message is the kind's `Display`.
    #[cold]
    pub fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            span: None,
        }
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Attach `span` unless an inner node already did.
    #[must_use]
    pub fn or_span(mut self, span: Span) -> Self {
        self.span.get_or_insert(span);
        self
    }

    /// Program-observable failure code, if this error has one.
    pub fn failure_code(&self) -> Option<FailureCode> {
        match self.kind {
            EvalErrorKind::PatternConstraintFailed => Some(FailureCode::PatternConstraintFailed),
            EvalErrorKind::NoMatchingArm => Some(FailureCode::NoMatchingArm),
            EvalErrorKind::TypeAssertionFailed { .. } => Some(FailureCode::TypeAssertionFailed),
            EvalErrorKind::DivisionByZero
            | EvalErrorKind::IntegerOverflow { .. }
            | EvalErrorKind::StackOverflow { .. }
            | EvalErrorKind::Custom { .. } => None,
        }
    }

    /// Resource exhaustion; the program cannot meaningfully continue.
    pub fn is_fatal(&self) -> bool {
        matches!(self.kind, EvalErrorKind::StackOverflow { .. })
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "runtime error: {}", self.message)?;
        if let Some(code) = self.failure_code() {
            write!(f, " [{code}]")?;
        }
        if let Some(span) = self.span {
            write!(f, "\n  --> {span}")?;
        }
        Ok(())
    }
}

impl std::error::Error for EvalError {}

// Factories

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn integer_overflow(operation: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow { operation })
}

#[cold]
pub fn stack_overflow(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackOverflow { depth })
}

#[cold]
pub fn pattern_constraint_failed() -> EvalError {
    EvalError::from_kind(EvalErrorKind::PatternConstraintFailed)
}

#[cold]
pub fn no_matching_arm() -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoMatchingArm)
}

#[cold]
pub fn type_assertion_failed(expected: impl Into<String>, found: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeAssertionFailed {
        expected: expected.into(),
        found: found.into(),
    })
}
