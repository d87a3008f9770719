//! Compile-time scope state.
//!
//! `TypeState` is threaded *down* the tree while checking. It is immutable
//! from a child's point of view: entering a block or function body creates a
//! new frame linked to the parent through `Rc`, and declaring into the
//! current frame copies it on write if a child still shares it.

use std::rc::Rc;

use rustc_hash::FxHashMap;
use tern_ir::{Name, Purity, StringInterner};

use crate::Type;

/// Produces a type each time a defined type name is used.
pub type TypeFactory = Rc<dyn Fn() -> Type>;

/// A variable frame.
#[derive(Clone)]
struct VarFrame {
    bindings: FxHashMap<Name, Type>,
    /// Function depth owning these bindings. `None` for std-lib frames,
    /// which are never captured.
    depth: Option<u32>,
    parent: Option<Rc<VarFrame>>,
}

#[derive(Clone)]
struct TypeFrame {
    types: FxHashMap<Name, TypeFactory>,
    parent: Option<Rc<TypeFrame>>,
}

/// Result of a variable lookup.
#[derive(Clone, Debug)]
pub struct VarEntry {
    pub ty: Type,
    /// Function depth of the owning frame (`None` for std-lib globals).
    pub depth: Option<u32>,
}

/// Scope state for the checker.
#[derive(Clone)]
pub struct TypeState {
    vars: Rc<VarFrame>,
    types: Rc<TypeFrame>,
    min_purity: Purity,
    is_in_function_body: bool,
    is_module_scope: bool,
    function_depth: u32,
}

impl TypeState {
    /// Root state for a module: builtin types, then a std-lib frame holding
    /// `std_lib_shape`, then the module frame at depth 0.
    pub fn for_module(interner: &StringInterner, std_lib_shape: &[(Name, Type)]) -> Self {
        let mut builtins: FxHashMap<Name, TypeFactory> = FxHashMap::default();
        let prims: [(&str, fn() -> Type); 6] = [
            ("Unit", Type::unit),
            ("Int", Type::int),
            ("String", Type::string),
            ("Boolean", Type::boolean),
            ("Never", Type::never),
            ("Unknown", Type::unknown),
        ];
        for (name, make) in prims {
            builtins.insert(interner.intern(name), Rc::new(make));
        }

        let std_lib = Rc::new(VarFrame {
            bindings: std_lib_shape.iter().cloned().collect(),
            depth: None,
            parent: None,
        });
        TypeState {
            vars: Rc::new(VarFrame {
                bindings: FxHashMap::default(),
                depth: Some(0),
                parent: Some(std_lib),
            }),
            types: Rc::new(TypeFrame {
                types: builtins,
                parent: None,
            }),
            min_purity: Purity::None,
            is_in_function_body: false,
            is_module_scope: true,
            function_depth: 0,
        }
    }

    fn push_frames(&self) -> (Rc<VarFrame>, Rc<TypeFrame>) {
        (
            Rc::new(VarFrame {
                bindings: FxHashMap::default(),
                depth: Some(self.function_depth),
                parent: Some(self.vars.clone()),
            }),
            Rc::new(TypeFrame {
                types: FxHashMap::default(),
                parent: Some(self.types.clone()),
            }),
        )
    }

    /// Nested block scope at the same function depth.
    #[must_use]
    pub fn child_scope(&self) -> Self {
        let (vars, types) = self.push_frames();
        TypeState {
            vars,
            types,
            is_module_scope: false,
            ..self.clone()
        }
    }

    /// Scope for the body of a function declared with `purity`.
    #[must_use]
    pub fn function_body(&self, purity: Purity) -> Self {
        let function_depth = self.function_depth + 1;
        let mut body = TypeState {
            function_depth,
            ..self.clone()
        };
        let (vars, types) = body.push_frames();
        body.vars = vars;
        body.types = types;
        body.min_purity = purity;
        body.is_in_function_body = true;
        body.is_module_scope = false;
        body
    }

    /// Declare a variable in the current frame.
    pub fn declare(&mut self, name: Name, ty: Type) {
        Rc::make_mut(&mut self.vars).bindings.insert(name, ty);
    }

    /// Look up a variable, innermost frame first.
    pub fn lookup_var(&self, name: Name) -> Option<VarEntry> {
        let mut frame = Some(&self.vars);
        while let Some(f) = frame {
            if let Some(ty) = f.bindings.get(&name) {
                return Some(VarEntry {
                    ty: ty.clone(),
                    depth: f.depth,
                });
            }
            frame = f.parent.as_ref();
        }
        None
    }

    /// Whether `name` is declared in the current frame.
    pub fn is_declared_locally(&self, name: Name) -> bool {
        self.vars.bindings.contains_key(&name)
    }

    /// Define a type name in the current frame.
    pub fn define_type(&mut self, name: Name, factory: TypeFactory) {
        Rc::make_mut(&mut self.types).types.insert(name, factory);
    }

    /// Resolve a type name, producing a fresh instance.
    pub fn lookup_type(&self, name: Name) -> Option<Type> {
        let mut frame = Some(&self.types);
        while let Some(f) = frame {
            if let Some(factory) = f.types.get(&name) {
                return Some(factory());
            }
            frame = f.parent.as_ref();
        }
        None
    }

    /// Least purity a callee may have here.
    pub fn min_purity(&self) -> Purity {
        self.min_purity
    }

    pub fn is_in_function_body(&self) -> bool {
        self.is_in_function_body
    }

    /// Whether this is the module's top-level scope.
    pub fn is_module_scope(&self) -> bool {
        self.is_module_scope
    }

    /// 0 at module level, plus one per enclosing function body.
    pub fn function_depth(&self) -> u32 {
        self.function_depth
    }
}

#[cfg(test)]
mod tests;
