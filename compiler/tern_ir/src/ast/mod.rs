//! AST node types.
//!
//! Three node families live in one [`Ast`] arena:
//! - **nodes** (`NodeId`): expressions and statements
//! - **patterns** (`PatternId`): assignment targets (bind, record destructure,
//!   value-constrained-by)
//! - **type expressions** (`TypeExprId`): annotations resolved by the checker
//!
//! Children are indices, never boxes.

mod arena;

use std::fmt;

use crate::{Name, Purity, Span};

pub use arena::{Ast, ConstructionError};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Create from a raw arena index.
            #[inline]
            pub const fn from_raw(raw: u32) -> Self {
                Self(raw)
            }

            /// Arena index.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

define_id!(
    /// Index of an expression or statement node.
    NodeId
);
define_id!(
    /// Index of an assignment-target pattern.
    PatternId
);
define_id!(
    /// Index of a type expression.
    TypeExprId
);

/// Expression or statement node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
}

/// Node variants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// Integer literal: `42`
    Int(i64),
    /// String literal (interned)
    Str(Name),
    /// Boolean literal: `true`, `false`
    Bool(bool),
    /// Unit literal: `()`
    Unit,
    /// Identifier reference
    Ident(Name),
    /// Binary operation: `a + b`
    Binary {
        op: BinaryOp,
        lhs: NodeId,
        rhs: NodeId,
    },
    /// Unary operation: `-a`, `not a`
    Unary { op: UnaryOp, operand: NodeId },
    /// Record literal: `{ x: 1, y: 2 }`. Keys are unique.
    Record(Vec<FieldInit>),
    /// Field access: `point.x`
    Field { record: NodeId, field: Name },
    /// Function definition expression
    Function(FunctionDef),
    /// Function invocation with a permission form
    Call(CallExpr),
    /// `if cond then a else b`
    If {
        cond: NodeId,
        then_branch: NodeId,
        else_branch: NodeId,
    },
    /// `match scrutinee { when pattern then body; ... }`
    Match {
        scrutinee: NodeId,
        arms: Vec<MatchArm>,
    },
    /// Statement sequence with its own scope
    Block(Vec<NodeId>),
    /// `let [export] pattern = value`
    Let {
        pattern: PatternId,
        value: NodeId,
        export: bool,
    },
    /// `type Name = TypeExpr`
    TypeAlias { name: Name, ty: TypeExprId },
    /// `return value`
    Return(NodeId),
    /// `print value`
    Print(NodeId),
    /// `value as Type`
    Assert { expr: NodeId, ty: TypeExprId },
    /// `import pattern from "path"`
    Import { pattern: PatternId, path: Name },
}

/// `name: value` inside a record literal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FieldInit {
    pub name: Name,
    pub value: NodeId,
    pub span: Span,
}

/// Declared generic parameter: `T` or `T of Constraint`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GenericParam {
    pub name: Name,
    /// Constraint; `Unknown` when omitted.
    pub constraint: Option<TypeExprId>,
    pub span: Span,
}

/// `purity <G...>(params) [ReturnType] => body`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionDef {
    pub purity: Purity,
    pub generics: Vec<GenericParam>,
    pub params: Vec<PatternId>,
    pub return_type: Option<TypeExprId>,
    pub body: NodeId,
}

/// Call site. `permission` is the level named by the call form
/// (`run`, `get`, or unmarked for `pure`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallExpr {
    pub callee: NodeId,
    pub permission: Purity,
    pub type_args: Vec<TypeExprId>,
    pub args: Vec<NodeId>,
}

/// `when pattern then body`
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MatchArm {
    pub pattern: PatternId,
    pub body: NodeId,
    pub span: Span,
}

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Concat,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
}

impl BinaryOp {
    /// Source symbol, for diagnostics.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Concat => "++",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

/// Unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    Neg,
    Not,
}

impl UnaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "not",
        }
    }
}

/// Assignment-target pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    pub kind: PatternKind,
    pub span: Span,
}

/// Pattern variants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PatternKind {
    /// `name` or `name Type`
    Bind {
        name: Name,
        annotation: Option<TypeExprId>,
    },
    /// `{ field: pattern, ... }`. Field names are unique.
    Record(Vec<FieldPattern>),
    /// `pattern where condition`
    Constrained { pattern: PatternId, condition: NodeId },
}

/// `field: pattern` inside a record pattern.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FieldPattern {
    pub name: Name,
    pub pattern: PatternId,
}

/// Type expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeExpr {
    pub kind: TypeExprKind,
    pub span: Span,
}

/// Type expression variants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeExprKind {
    /// Builtin, alias, or generic in scope
    Named(Name),
    /// `{ x Int, y String }`. Field names are unique.
    Record(Vec<FieldType>),
    /// `purity <G...>(P...) => R`
    Function {
        purity: Purity,
        generics: Vec<GenericParam>,
        params: Vec<TypeExprId>,
        ret: TypeExprId,
    },
}

/// `name Type` inside a record type expression.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FieldType {
    pub name: Name,
    pub ty: TypeExprId,
}
