use std::fmt;

use tern_ir::{ConstructionError, Span, StringInterner};

use crate::ErrorCode;

/// A labeled span with a message.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    pub span: Span,
    pub message: String,
    pub is_primary: bool,
}

impl Label {
    /// Create a primary label (the main error location).
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Label {
            span,
            message: message.into(),
            is_primary: true,
        }
    }

    /// Create a secondary label (related context).
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Label {
            span,
            message: message.into(),
            is_primary: false,
        }
    }
}

/// A semantic error: `(message, position)` plus optional context.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    /// Error code for searchability.
    pub code: ErrorCode,
    /// Main error message.
    pub message: String,
    /// Labeled spans showing where the error occurred.
    pub labels: Vec<Label>,
    /// Additional notes providing context.
    pub notes: Vec<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(code: ErrorCode) -> Self {
        Diagnostic {
            code,
            message: String::new(),
            labels: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Set the main message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add a primary label at the error location.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label for context.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    /// Add a note providing additional context.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Get the primary span (first primary label's span).
    pub fn primary_span(&self) -> Option<Span> {
        self.labels.iter().find(|l| l.is_primary).map(|l| l.span)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error [{}]: {}", self.code, self.message)?;

        for label in &self.labels {
            let marker = if label.is_primary { "-->" } else { "   " };
            write!(f, "\n  {} {:?}: {}", marker, label.span, label.message)?;
        }

        for note in &self.notes {
            write!(f, "\n  = note: {note}")?;
        }

        Ok(())
    }
}

impl std::error::Error for Diagnostic {}

/// Convert an AST construction failure into a semantic error.
pub fn construction_error(error: ConstructionError, interner: &StringInterner) -> Diagnostic {
    let name = interner.lookup(error.name());
    let (what, first, second) = match error {
        ConstructionError::DuplicateRecordKey { first, second, .. } => ("key", first, second),
        ConstructionError::DuplicatePatternField { first, second, .. } => {
            ("pattern field", first, second)
        }
        ConstructionError::DuplicateTypeField { first, second, .. } => {
            ("type field", first, second)
        }
    };
    Diagnostic::error(ErrorCode::E2006)
        .with_message(format!("duplicate record {what} `{name}`"))
        .with_label(second, format!("`{name}` repeated here"))
        .with_secondary_label(first, "first used here")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builder_and_primary_span() {
        let diag = Diagnostic::error(ErrorCode::E2003)
            .with_message("unknown identifier `x`")
            .with_secondary_label(Span::new(0, 1), "context")
            .with_label(Span::new(5, 6), "not found in this scope");
        assert_eq!(diag.primary_span(), Some(Span::new(5, 6)));
    }

    #[test]
    fn test_display() {
        let diag = Diagnostic::error(ErrorCode::E2001)
            .with_message("type mismatch")
            .with_label(Span::new(1, 4), "here")
            .with_note("a note");
        assert_eq!(
            diag.to_string(),
            "error [E2001]: type mismatch\n  --> 1..4: here\n  = note: a note"
        );
    }

    #[test]
    fn test_construction_error_names_field() {
        let interner = StringInterner::new();
        let name = interner.intern("x");
        let diag = construction_error(
            ConstructionError::DuplicateRecordKey {
                name,
                first: Span::new(0, 1),
                second: Span::new(4, 5),
            },
            &interner,
        );
        assert_eq!(diag.code, ErrorCode::E2006);
        assert!(diag.message.contains("`x`"));
        assert_eq!(diag.primary_span(), Some(Span::new(4, 5)));
    }
}
