//! Runtime values.
//!
//! A [`Value`] pairs raw data with the static type it was produced under.
//! Values are immutable; records and functions share their payload through
//! `Rc`, so cloning a value is cheap.

use std::fmt;
use std::rc::Rc;

use tern_ir::{Ast, Name, NodeId, StringInterner};
use tern_types::{CheckedModule, Type, TypeTable};

use crate::EvalError;

/// A checked module: its AST plus the checker's side table.
///
/// Closures keep their defining program alive so they can be called after
/// the module that created them finished executing.
pub struct Program {
    pub ast: Rc<Ast>,
    pub table: TypeTable,
    /// Type of the module's export record.
    pub exports: Type,
}

impl Program {
    pub fn new(ast: Rc<Ast>, checked: CheckedModule) -> Rc<Self> {
        Rc::new(Program {
            ast,
            table: checked.table,
            exports: checked.exports,
        })
    }
}

/// Host function body.
pub type NativeFn = dyn Fn(&[Value]) -> Result<Value, EvalError>;

/// A function defined in Tern source, with its captured bindings.
pub struct Closure {
    pub program: Rc<Program>,
    /// The `Function` node that defined it.
    pub node: NodeId,
    pub captures: Vec<(Name, Value)>,
}

/// Callable payload.
pub enum FunctionValue {
    Closure(Closure),
    Native { name: Name, func: Rc<NativeFn> },
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionValue::Closure(closure) => f
                .debug_struct("Closure")
                .field("node", &closure.node)
                .field("captures", &closure.captures.len())
                .finish(),
            FunctionValue::Native { name, .. } => {
                f.debug_struct("Native").field("name", name).finish()
            }
        }
    }
}

/// Raw runtime data.
#[derive(Clone, Debug)]
pub enum ValueData {
    Unit,
    Int(i64),
    Str(Rc<str>),
    Bool(bool),
    /// Fields in construction order.
    Record(Rc<Vec<(Name, Value)>>),
    Function(Rc<FunctionValue>),
}

/// Runtime value with its static type.
#[derive(Clone, Debug)]
pub struct Value {
    pub data: ValueData,
    pub ty: Type,
}

impl Value {
    pub fn unit() -> Self {
        Value {
            data: ValueData::Unit,
            ty: Type::unit(),
        }
    }

    pub fn int(n: i64) -> Self {
        Value {
            data: ValueData::Int(n),
            ty: Type::int(),
        }
    }

    pub fn string(s: &str) -> Self {
        Value {
            data: ValueData::Str(Rc::from(s)),
            ty: Type::string(),
        }
    }

    pub fn boolean(b: bool) -> Self {
        Value {
            data: ValueData::Bool(b),
            ty: Type::boolean(),
        }
    }

    /// Build a record value; its type lists the fields' own types.
    pub fn record(fields: Vec<(Name, Value)>) -> Self {
        let ty = Type::record(fields.iter().map(|(n, v)| (*n, v.ty.clone())).collect());
        Self::record_typed(fields, ty)
    }

    /// Build a record value under an explicit static type.
    pub fn record_typed(fields: Vec<(Name, Value)>, ty: Type) -> Self {
        Value {
            data: ValueData::Record(Rc::new(fields)),
            ty,
        }
    }

    /// Wrap a host function. `ty` must be a function type.
    pub fn native(
        name: Name,
        ty: Type,
        func: impl Fn(&[Value]) -> Result<Value, EvalError> + 'static,
    ) -> Self {
        Value {
            data: ValueData::Function(Rc::new(FunctionValue::Native {
                name,
                func: Rc::new(func),
            })),
            ty,
        }
    }

    pub fn closure(closure: Closure, ty: Type) -> Self {
        Value {
            data: ValueData::Function(Rc::new(FunctionValue::Closure(closure))),
            ty,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self.data {
            ValueData::Int(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.data {
            ValueData::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.data {
            ValueData::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Look up a record field.
    pub fn field(&self, name: Name) -> Option<&Value> {
        match &self.data {
            ValueData::Record(fields) => fields.iter().find(|(n, _)| *n == name).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn is_record(&self) -> bool {
        matches!(self.data, ValueData::Record(_))
    }

    /// Render for `print` output.
    pub fn display<'a>(&'a self, interner: &'a StringInterner) -> ValueDisplay<'a> {
        ValueDisplay {
            value: self,
            interner,
            nested: false,
        }
    }
}

/// Structural equality on the data; functions compare by identity, record
/// field order is irrelevant.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (&self.data, &other.data) {
            (ValueData::Unit, ValueData::Unit) => true,
            (ValueData::Int(a), ValueData::Int(b)) => a == b,
            (ValueData::Str(a), ValueData::Str(b)) => a == b,
            (ValueData::Bool(a), ValueData::Bool(b)) => a == b,
            (ValueData::Record(a), ValueData::Record(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(name, value)| other.field(*name) == Some(value))
            }
            (ValueData::Function(a), ValueData::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// `print` rendering of a value.
pub struct ValueDisplay<'a> {
    value: &'a Value,
    interner: &'a StringInterner,
    /// Strings inside records are quoted.
    nested: bool,
}

impl fmt::Display for ValueDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value.data {
            ValueData::Unit => f.write_str("()"),
            ValueData::Int(n) => write!(f, "{n}"),
            ValueData::Str(s) if self.nested => write!(f, "{s:?}"),
            ValueData::Str(s) => f.write_str(s),
            ValueData::Bool(b) => write!(f, "{b}"),
            ValueData::Record(fields) if fields.is_empty() => f.write_str("{}"),
            ValueData::Record(fields) => {
                f.write_str("{ ")?;
                for (i, (name, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    let inner = ValueDisplay {
                        value,
                        interner: self.interner,
                        nested: true,
                    };
                    write!(f, "{}: {inner}", self.interner.lookup(*name))?;
                }
                f.write_str(" }")
            }
            ValueData::Function(_) => {
                write!(f, "<{}>", self.value.ty.display(self.interner))
            }
        }
    }
}

#[cfg(test)]
mod tests;
