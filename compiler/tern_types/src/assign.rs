//! Structural assignability.

use std::rc::Rc;

use crate::traverse::{substitute, Substitution};
use crate::{FunctionType, ParamType, RecordType, Type, TypeKind};

/// Whether a value of type `assigner` may be used where `assignee` is
/// expected.
///
/// - `Never` is assignable to everything; everything but `Unknown` itself is
///   assignable to `Unknown`, and `Unknown` is assignable to `Unknown`
/// - a parameter type widens to its constraint when the other side is
///   concrete; a concrete type is never assignable to a parameter type
/// - between two parameter types, the assignee must appear on the
///   assigner's constraint chain
/// - records use width subtyping; functions compare generics, then params
///   contravariantly, return covariantly, and require at least the
///   assignee's purity
pub fn is_assignable(assigner: &Type, assignee: &Type) -> bool {
    tern_stack::ensure_sufficient_stack(|| assignable(assigner, assignee))
}

fn assignable(assigner: &Type, assignee: &Type) -> bool {
    if assigner.is_never() {
        return true;
    }
    if assignee.is_unknown() {
        return true;
    }
    if assignee.is_never() || assigner.is_unknown() {
        return false;
    }
    match (assigner, assignee) {
        (Type::Param(param), Type::Concrete(_)) => assignable(&param.constraint, assignee),
        (Type::Concrete(_), Type::Param(_)) => false,
        (Type::Param(from), Type::Param(to)) => constraint_chain_contains(from, to),
        (Type::Concrete(from), Type::Concrete(to)) => match (&from.kind, &to.kind) {
            (TypeKind::Record(from), TypeKind::Record(to)) => record_assignable(from, to),
            (TypeKind::Function(from), TypeKind::Function(to)) => {
                function_assignable(from, to)
            }
            (TypeKind::Unit, TypeKind::Unit)
            | (TypeKind::Int, TypeKind::Int)
            | (TypeKind::Str, TypeKind::Str)
            | (TypeKind::Bool, TypeKind::Bool) => true,
            _ => false,
        },
    }
}

fn constraint_chain_contains(from: &Rc<ParamType>, to: &ParamType) -> bool {
    let mut current = from;
    loop {
        if current.id == to.id {
            return true;
        }
        match &current.constraint {
            Type::Param(next) => current = next,
            Type::Concrete(_) => return false,
        }
    }
}

fn record_assignable(from: &RecordType, to: &RecordType) -> bool {
    to.fields.iter().all(|(name, to_ty)| {
        from.field(*name)
            .is_some_and(|from_ty| assignable(from_ty, to_ty))
    })
}

fn function_assignable(from: &FunctionType, to: &FunctionType) -> bool {
    if from.generics.len() != to.generics.len() || from.params.len() != to.params.len() {
        return false;
    }
    if from.purity < to.purity {
        return false;
    }

    // Rename the assignee's generics to the assigner's.
    let mut rename = Substitution::new();
    for (f, t) in from.generics.iter().zip(&to.generics) {
        rename.insert(t.id, Type::Param(f.clone()));
    }
    let generics_ok = from.generics.iter().zip(&to.generics).all(|(f, t)| {
        let to_constraint = substitute(&t.constraint, &mut rename);
        assignable(&f.constraint, &to_constraint)
    });
    if !generics_ok {
        return false;
    }

    let params_ok = from.params.iter().zip(&to.params).all(|(f, t)| {
        let to_param = substitute(t, &mut rename);
        assignable(&to_param, f)
    });
    params_ok && assignable(&from.ret, &substitute(&to.ret, &mut rename))
}

/// The wider of two types: `b` if `a` is assignable to it, else `a` if `b`
/// is assignable to that. `None` when the types are unrelated.
pub fn widest(a: &Type, b: &Type) -> Option<Type> {
    if is_assignable(a, b) {
        Some(b.clone())
    } else if is_assignable(b, a) {
        Some(a.clone())
    } else {
        None
    }
}
