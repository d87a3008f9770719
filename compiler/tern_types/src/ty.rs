//! Type representation.

use std::cell::Cell;
use std::rc::Rc;

use tern_ir::{Name, Purity};

/// Identity of a generic parameter.
///
/// Two parameter types are the same generic iff their ids match, whatever
/// their names or current constraints.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct GenericId(u32);

impl GenericId {
    pub const fn from_raw(raw: u32) -> Self {
        GenericId(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Allocator for [`GenericId`]s.
///
/// One allocator serves a whole compilation, imported modules included, so
/// generics from different modules never collide.
#[derive(Default, Debug)]
pub struct GenericIdGen {
    next: Cell<u32>,
}

impl GenericIdGen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fresh(&self) -> GenericId {
        let id = self.next.get();
        self.next.set(id + 1);
        GenericId(id)
    }
}

/// A Tern type.
#[derive(Clone, Debug)]
pub enum Type {
    Concrete(ConcreteType),
    /// Generic placeholder.
    Param(Rc<ParamType>),
}

/// A concrete type with an optional alias name used for display.
#[derive(Clone, Debug)]
pub struct ConcreteType {
    pub kind: TypeKind,
    pub display_name: Option<Name>,
}

/// Category of a concrete type.
#[derive(Clone, Debug)]
pub enum TypeKind {
    Unit,
    Int,
    Str,
    Bool,
    /// Type of expressions that never produce a value (`return`).
    Never,
    /// Top type: everything is assignable to it.
    Unknown,
    Record(Rc<RecordType>),
    Function(Rc<FunctionType>),
}

/// Structural record type. Field order is declaration order.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordType {
    pub fields: Vec<(Name, Type)>,
}

impl RecordType {
    /// Type of a field, if present.
    pub fn field(&self, name: Name) -> Option<&Type> {
        self.fields
            .iter()
            .find_map(|(n, ty)| (*n == name).then_some(ty))
    }
}

/// Function type: `purity <generics>(params) => ret`.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionType {
    pub generics: Vec<Rc<ParamType>>,
    pub params: Vec<Type>,
    pub ret: Type,
    pub purity: Purity,
}

/// A generic parameter: display name, constraint, identity.
///
/// The constraint may itself be a parameter type; following constraints
/// always ends at a concrete type.
#[derive(Clone, Debug)]
pub struct ParamType {
    pub id: GenericId,
    pub name: Name,
    pub constraint: Type,
}

impl PartialEq for ParamType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ParamType {}

impl Type {
    fn concrete(kind: TypeKind) -> Self {
        Type::Concrete(ConcreteType {
            kind,
            display_name: None,
        })
    }

    pub fn unit() -> Self {
        Self::concrete(TypeKind::Unit)
    }

    pub fn int() -> Self {
        Self::concrete(TypeKind::Int)
    }

    pub fn string() -> Self {
        Self::concrete(TypeKind::Str)
    }

    pub fn boolean() -> Self {
        Self::concrete(TypeKind::Bool)
    }

    pub fn never() -> Self {
        Self::concrete(TypeKind::Never)
    }

    pub fn unknown() -> Self {
        Self::concrete(TypeKind::Unknown)
    }

    pub fn record(fields: Vec<(Name, Type)>) -> Self {
        Self::concrete(TypeKind::Record(Rc::new(RecordType { fields })))
    }

    pub fn function(function: FunctionType) -> Self {
        Self::concrete(TypeKind::Function(Rc::new(function)))
    }

    pub fn param(param: Rc<ParamType>) -> Self {
        Type::Param(param)
    }

    /// Same type, displayed under `name`. Parameter types keep their own name.
    #[must_use]
    pub fn with_display_name(self, name: Name) -> Self {
        match self {
            Type::Concrete(c) => Type::Concrete(ConcreteType {
                kind: c.kind,
                display_name: Some(name),
            }),
            param @ Type::Param(_) => param,
        }
    }

    /// The concrete type at the end of the constraint chain.
    pub fn resolve(&self) -> &ConcreteType {
        let mut ty = self;
        loop {
            match ty {
                Type::Concrete(c) => return c,
                Type::Param(p) => ty = &p.constraint,
            }
        }
    }

    /// Kind if this is a concrete type (parameters are not resolved).
    pub fn concrete_kind(&self) -> Option<&TypeKind> {
        match self {
            Type::Concrete(c) => Some(&c.kind),
            Type::Param(_) => None,
        }
    }

    pub fn is_never(&self) -> bool {
        matches!(self.concrete_kind(), Some(TypeKind::Never))
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self.concrete_kind(), Some(TypeKind::Unknown))
    }

    /// Record view, looking through parameter constraints.
    pub fn as_record(&self) -> Option<&Rc<RecordType>> {
        match &self.resolve().kind {
            TypeKind::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Function view, looking through parameter constraints.
    pub fn as_function(&self) -> Option<&Rc<FunctionType>> {
        match &self.resolve().kind {
            TypeKind::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Whether any parameter type occurs in this type.
    pub fn contains_params(&self) -> bool {
        match self {
            Type::Param(_) => true,
            Type::Concrete(c) => match &c.kind {
                TypeKind::Record(r) => r.fields.iter().any(|(_, ty)| ty.contains_params()),
                TypeKind::Function(f) => {
                    !f.generics.is_empty()
                        || f.params.iter().any(Type::contains_params)
                        || f.ret.contains_params()
                }
                _ => false,
            },
        }
    }
}

/// Structural equality. Display names are ignored; parameters compare by id.
impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Type::Param(a), Type::Param(b)) => a.id == b.id,
            (Type::Concrete(a), Type::Concrete(b)) => match (&a.kind, &b.kind) {
                (TypeKind::Unit, TypeKind::Unit)
                | (TypeKind::Int, TypeKind::Int)
                | (TypeKind::Str, TypeKind::Str)
                | (TypeKind::Bool, TypeKind::Bool)
                | (TypeKind::Never, TypeKind::Never)
                | (TypeKind::Unknown, TypeKind::Unknown) => true,
                (TypeKind::Record(x), TypeKind::Record(y)) => x == y,
                (TypeKind::Function(x), TypeKind::Function(y)) => x == y,
                _ => false,
            },
            _ => false,
        }
    }
}
