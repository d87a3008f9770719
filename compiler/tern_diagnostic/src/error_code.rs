use std::fmt;

/// Error codes for all diagnostics produced by this core.
///
/// Format: E#### where the first digit indicates the phase:
/// - E2xxx: Semantic (type-check) errors
/// - E9xxx: Internal errors
///
/// Lexer and parser codes belong to the front end and never appear here.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Semantic Errors (E2xxx)
    /// Type mismatch
    E2001,
    /// Unknown type name
    E2002,
    /// Unknown identifier
    E2003,
    /// Argument count mismatch
    E2004,
    /// Cannot infer type (missing annotation or unbound generic)
    E2005,
    /// Duplicate definition
    E2006,
    /// Callee is less pure than the calling context allows
    E2007,
    /// Call-site permission does not match the callee's purity
    E2008,
    /// Generic constraint not satisfied
    E2009,
    /// Conflicting inferred types for one generic parameter
    E2010,
    /// Too many type arguments
    E2011,
    /// Missing record field
    E2012,
    /// Expected a record type
    E2013,
    /// Value is not callable
    E2014,
    /// Malformed match
    E2015,
    /// Construct used where it is not allowed (`return`, `export`, `import`)
    E2016,
    /// Type assertion involving generic parameters
    E2017,
    /// Refutable pattern in an exported binding
    E2018,
    /// Imported module not found
    E2019,
    /// Circular import
    E2020,

    // Internal Errors (E9xxx)
    /// Internal invariant violated
    E9001,
}

impl ErrorCode {
    /// Get the error code as a string (e.g., "E2001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E2008 => "E2008",
            ErrorCode::E2009 => "E2009",
            ErrorCode::E2010 => "E2010",
            ErrorCode::E2011 => "E2011",
            ErrorCode::E2012 => "E2012",
            ErrorCode::E2013 => "E2013",
            ErrorCode::E2014 => "E2014",
            ErrorCode::E2015 => "E2015",
            ErrorCode::E2016 => "E2016",
            ErrorCode::E2017 => "E2017",
            ErrorCode::E2018 => "E2018",
            ErrorCode::E2019 => "E2019",
            ErrorCode::E2020 => "E2020",
            ErrorCode::E9001 => "E9001",
        }
    }

    /// Check if this is a semantic (type-check) error.
    pub fn is_semantic_error(&self) -> bool {
        self.as_str().starts_with("E2")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E2001.to_string(), "E2001");
        assert_eq!(ErrorCode::E9001.as_str(), "E9001");
    }

    #[test]
    fn test_phase_classification() {
        assert!(ErrorCode::E2012.is_semantic_error());
        assert!(!ErrorCode::E9001.is_semantic_error());
    }
}
