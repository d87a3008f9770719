//! Rendering types as Tern source syntax.

use std::fmt;

use tern_ir::StringInterner;

use crate::{ParamType, Type, TypeKind};

/// Displays a [`Type`] with names resolved through the interner.
pub struct TypeDisplay<'a> {
    ty: &'a Type,
    interner: &'a StringInterner,
}

impl Type {
    /// Render as Tern syntax, e.g. `pure <T of { x Int }>(T) => Int`.
    pub fn display<'a>(&'a self, interner: &'a StringInterner) -> TypeDisplay<'a> {
        TypeDisplay { ty: self, interner }
    }
}

impl TypeDisplay<'_> {
    fn nested<'b>(&'b self, ty: &'b Type) -> TypeDisplay<'b> {
        TypeDisplay {
            ty,
            interner: self.interner,
        }
    }

    fn write_generic(&self, f: &mut fmt::Formatter<'_>, param: &ParamType) -> fmt::Result {
        f.write_str(self.interner.lookup(param.name))?;
        if !param.constraint.is_unknown() {
            write!(f, " of {}", self.nested(&param.constraint))?;
        }
        Ok(())
    }
}

impl fmt::Display for TypeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let concrete = match self.ty {
            Type::Param(p) => return f.write_str(self.interner.lookup(p.name)),
            Type::Concrete(c) => c,
        };
        if let Some(name) = concrete.display_name {
            return f.write_str(self.interner.lookup(name));
        }
        match &concrete.kind {
            TypeKind::Unit => f.write_str("Unit"),
            TypeKind::Int => f.write_str("Int"),
            TypeKind::Str => f.write_str("String"),
            TypeKind::Bool => f.write_str("Boolean"),
            TypeKind::Never => f.write_str("Never"),
            TypeKind::Unknown => f.write_str("Unknown"),
            TypeKind::Record(record) => {
                if record.fields.is_empty() {
                    return f.write_str("{}");
                }
                f.write_str("{ ")?;
                for (i, (name, ty)) in record.fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{} {}", self.interner.lookup(*name), self.nested(ty))?;
                }
                f.write_str(" }")
            }
            TypeKind::Function(func) => {
                write!(f, "{} ", func.purity)?;
                if !func.generics.is_empty() {
                    f.write_str("<")?;
                    for (i, g) in func.generics.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        self.write_generic(f, g)?;
                    }
                    f.write_str(">")?;
                }
                f.write_str("(")?;
                for (i, p) in func.params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", self.nested(p))?;
                }
                write!(f, ") => {}", self.nested(&func.ret))
            }
        }
    }
}
