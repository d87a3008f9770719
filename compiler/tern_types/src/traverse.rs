//! Type traversal.
//!
//! - [`TypeFolder`]: structural rewrite of a type (generic substitution)
//! - [`align_types`]: walks a declared type and an actual type side by side
//!   and reports what each free generic of the declared type lines up with

use std::rc::Rc;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::{ConcreteType, FunctionType, GenericId, ParamType, RecordType, Type, TypeKind};

/// Trait for transforming types via structural recursion.
///
/// Override the `fold_*` hooks to customize particular variants. The default
/// `fold` dispatches to them and rebuilds containers, preserving display
/// names.
///
/// ```text
/// struct Rename<'a>(&'a FxHashMap<GenericId, Type>);
///
/// impl TypeFolder for Rename<'_> {
///     fn fold_param(&mut self, param: &Rc<ParamType>) -> Type {
///         self.0.get(&param.id).cloned().unwrap_or_else(|| Type::Param(param.clone()))
///     }
/// }
/// ```
pub trait TypeFolder {
    fn fold(&mut self, ty: &Type) -> Type {
        match ty {
            Type::Param(param) => self.fold_param(param),
            Type::Concrete(concrete) => match &concrete.kind {
                TypeKind::Record(record) => {
                    keep_name(self.fold_record(record), concrete)
                }
                TypeKind::Function(function) => {
                    keep_name(self.fold_function(function), concrete)
                }
                TypeKind::Unit
                | TypeKind::Int
                | TypeKind::Str
                | TypeKind::Bool
                | TypeKind::Never
                | TypeKind::Unknown => ty.clone(),
            },
        }
    }

    fn fold_param(&mut self, param: &Rc<ParamType>) -> Type {
        Type::Param(param.clone())
    }

    fn fold_record(&mut self, record: &RecordType) -> Type {
        Type::record(
            record
                .fields
                .iter()
                .map(|(name, ty)| (*name, self.fold(ty)))
                .collect(),
        )
    }

    fn fold_function(&mut self, function: &FunctionType) -> Type {
        let generics = function
            .generics
            .iter()
            .map(|g| {
                Rc::new(ParamType {
                    id: g.id,
                    name: g.name,
                    constraint: self.fold(&g.constraint),
                })
            })
            .collect();
        Type::function(FunctionType {
            generics,
            params: function.params.iter().map(|p| self.fold(p)).collect(),
            ret: self.fold(&function.ret),
            purity: function.purity,
        })
    }
}

fn keep_name(ty: Type, original: &ConcreteType) -> Type {
    match original.display_name {
        Some(name) => ty.with_display_name(name),
        None => ty,
    }
}

/// Replaces generics by id.
#[derive(Default, Debug)]
pub struct Substitution {
    bindings: FxHashMap<GenericId, Type>,
}

impl Substitution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: GenericId, ty: Type) {
        self.bindings.insert(id, ty);
    }

    pub fn get(&self, id: GenericId) -> Option<&Type> {
        self.bindings.get(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl TypeFolder for Substitution {
    fn fold_param(&mut self, param: &Rc<ParamType>) -> Type {
        match self.bindings.get(&param.id) {
            Some(ty) => ty.clone(),
            None => Type::Param(param.clone()),
        }
    }
}

/// Apply `subst` to `ty`.
pub fn substitute(ty: &Type, subst: &mut Substitution) -> Type {
    if subst.is_empty() {
        return ty.clone();
    }
    subst.fold(ty)
}

/// Position of a type relative to the outermost call.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Variance {
    /// Produced by the callee or passed straight through.
    Covariant,
    /// Under an odd number of function-parameter positions.
    Contravariant,
}

impl Variance {
    #[must_use]
    pub fn flip(self) -> Self {
        match self {
            Variance::Covariant => Variance::Contravariant,
            Variance::Contravariant => Variance::Covariant,
        }
    }
}

/// Walk `declared` and `actual` together, calling `visit` for every
/// parameter type in `declared` that is not introduced by a function type
/// nested inside `declared`.
///
/// Shapes that do not line up are skipped; the caller's assignability check
/// reports them. The actual side is looked at through parameter constraints.
pub fn align_types<E>(
    declared: &Type,
    actual: &Type,
    visit: &mut impl FnMut(&Rc<ParamType>, &Type, Variance) -> Result<(), E>,
) -> Result<(), E> {
    let mut inner: SmallVec<[GenericId; 4]> = SmallVec::new();
    align(declared, actual, Variance::Covariant, &mut inner, visit)
}

fn align<E>(
    declared: &Type,
    actual: &Type,
    variance: Variance,
    inner: &mut SmallVec<[GenericId; 4]>,
    visit: &mut impl FnMut(&Rc<ParamType>, &Type, Variance) -> Result<(), E>,
) -> Result<(), E> {
    let declared = match declared {
        Type::Param(param) => {
            if inner.contains(&param.id) {
                return Ok(());
            }
            return visit(param, actual, variance);
        }
        Type::Concrete(c) => c,
    };
    match (&declared.kind, &actual.resolve().kind) {
        (TypeKind::Record(d), TypeKind::Record(a)) => {
            for (name, d_ty) in &d.fields {
                if let Some(a_ty) = a.field(*name) {
                    align(d_ty, a_ty, variance, inner, visit)?;
                }
            }
            Ok(())
        }
        (TypeKind::Function(d), TypeKind::Function(a)) => {
            let mark = inner.len();
            inner.extend(d.generics.iter().map(|g| g.id));
            let result = d
                .params
                .iter()
                .zip(&a.params)
                .try_for_each(|(dp, ap)| align(dp, ap, variance.flip(), inner, visit))
                .and_then(|()| align(&d.ret, &a.ret, variance, inner, visit));
            inner.truncate(mark);
            result
        }
        _ => Ok(()),
    }
}
