//! Function purity levels.

use std::fmt;

/// A function's declared effect level.
///
/// Totally ordered: `None < Gets < Pure`. A purer function may stand in for a
/// less pure one, never the reverse.
///
/// Call sites select exactly one level with a permission form:
///
/// | level  | declaration keyword | call-site form         |
/// |--------|---------------------|------------------------|
/// | `None` | `none`              | `run f(..)`            |
/// | `Gets` | `gets`              | `get f(..)`            |
/// | `Pure` | `pure`              | `f(..)` (no keyword)   |
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Purity {
    None,
    Gets,
    Pure,
}

impl Purity {
    /// Keyword used when declaring a function or function type.
    pub const fn keyword(self) -> &'static str {
        match self {
            Purity::None => "none",
            Purity::Gets => "gets",
            Purity::Pure => "pure",
        }
    }

    /// Permission keyword a call site uses to invoke at this level.
    ///
    /// `Pure` functions are invoked with the unmarked form.
    pub const fn call_keyword(self) -> Option<&'static str> {
        match self {
            Purity::None => Some("run"),
            Purity::Gets => Some("get"),
            Purity::Pure => None,
        }
    }

    /// Human-readable description of the call form, for diagnostics.
    pub fn call_form(self) -> String {
        match self.call_keyword() {
            Some(keyword) => format!("the `{keyword}` keyword"),
            None => "no permission keyword".to_string(),
        }
    }
}

impl fmt::Display for Purity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purity_order() {
        assert!(Purity::None < Purity::Gets);
        assert!(Purity::Gets < Purity::Pure);
        assert_eq!(Purity::Pure.max(Purity::None), Purity::Pure);
    }

    #[test]
    fn test_call_forms() {
        assert_eq!(Purity::None.call_keyword(), Some("run"));
        assert_eq!(Purity::Gets.call_keyword(), Some("get"));
        assert_eq!(Purity::Pure.call_keyword(), None);
        assert_eq!(Purity::Pure.call_form(), "no permission keyword");
        assert_eq!(Purity::None.call_form(), "the `run` keyword");
    }
}
