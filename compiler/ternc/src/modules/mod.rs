//! Module cache and import resolution.
//!
//! Imported modules are checked the first time an `import` names them and
//! executed the first time one runs; both results are cached by path for the
//! rest of the compilation. An explicit loading stack detects circular
//! imports before recursing into a module that is still being checked.

use std::rc::Rc;

use rustc_hash::{FxHashMap, FxHashSet};
use tern_diagnostic::{internal_error, Diagnostic, ErrorCode};
use tern_eval::{EvalResult, Globals, Interpreter, ModuleLoader, Program, Value};
use tern_ir::{Ast, DebugHandler, Name, Span, StringInterner};
use tern_types::{check_module, GenericIdGen, ImportResolver, Type};

/// Module path → module AST.
pub type ModuleDefinitions = FxHashMap<Name, Rc<Ast>>;

/// Modules currently being checked, outermost first.
#[derive(Debug, Default)]
struct LoadingStack {
    stack: Vec<Name>,
    set: FxHashSet<Name>,
}

impl LoadingStack {
    fn would_cycle(&self, path: Name) -> bool {
        self.set.contains(&path)
    }

    /// Push `path`; on a cycle returns the chain that closes it.
    fn start_loading(&mut self, path: Name) -> Result<(), Vec<Name>> {
        if self.would_cycle(path) {
            let cycle = self
                .stack
                .iter()
                .skip_while(|&&p| p != path)
                .copied()
                .chain(std::iter::once(path))
                .collect();
            return Err(cycle);
        }
        self.set.insert(path);
        self.stack.push(path);
        Ok(())
    }

    fn finish_loading(&mut self) {
        if let Some(popped) = self.stack.pop() {
            self.set.remove(&popped);
        }
    }
}

struct CachedModule {
    program: Rc<Program>,
    /// Export record, once the module has run.
    exports: Option<Value>,
}

/// Checked and executed modules of one compilation.
pub struct ModuleCache<'a> {
    interner: &'a StringInterner,
    ids: &'a GenericIdGen,
    definitions: &'a ModuleDefinitions,
    std_lib_shape: &'a [(Name, Type)],
    debug: &'a DebugHandler,
    globals: Rc<Globals>,
    loading: LoadingStack,
    modules: FxHashMap<Name, CachedModule>,
}

impl<'a> ModuleCache<'a> {
    pub fn new(
        interner: &'a StringInterner,
        ids: &'a GenericIdGen,
        definitions: &'a ModuleDefinitions,
        std_lib_shape: &'a [(Name, Type)],
        debug: &'a DebugHandler,
        globals: Rc<Globals>,
    ) -> Self {
        ModuleCache {
            interner,
            ids,
            definitions,
            std_lib_shape,
            debug,
            globals,
            loading: LoadingStack::default(),
            modules: FxHashMap::default(),
        }
    }

    /// Number of modules checked so far.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    #[tracing::instrument(level = "debug", skip_all, fields(path = self.interner.lookup(path)))]
    fn check(&mut self, path: Name, span: Span) -> Result<Type, Diagnostic> {
        let Some(ast) = self.definitions.get(&path).cloned() else {
            return Err(Diagnostic::error(ErrorCode::E2019)
                .with_message(format!("module `{}` not found", self.interner.lookup(path)))
                .with_label(span, "imported here"));
        };
        let (interner, ids, debug) = (self.interner, self.ids, self.debug);
        let shape = self.std_lib_shape;
        let checked = check_module(&ast, interner, ids, shape, debug, self).map_err(|diag| {
            diag.with_note(format!("while checking module `{}`", interner.lookup(path)))
        })?;
        let exports = checked.exports.clone();
        self.modules.insert(
            path,
            CachedModule {
                program: Program::new(ast, checked),
                exports: None,
            },
        );
        Ok(exports)
    }
}

impl ImportResolver for ModuleCache<'_> {
    fn resolve(&mut self, path: Name, span: Span) -> Result<Type, Diagnostic> {
        if let Some(module) = self.modules.get(&path) {
            return Ok(module.program.exports.clone());
        }
        if let Err(cycle) = self.loading.start_loading(path) {
            let chain: Vec<&str> = cycle.iter().map(|&p| self.interner.lookup(p)).collect();
            return Err(Diagnostic::error(ErrorCode::E2020)
                .with_message(format!("circular import: {}", chain.join(" -> ")))
                .with_label(span, "imported while still being loaded"));
        }
        let result = self.check(path, span);
        self.loading.finish_loading();
        result
    }
}

impl ModuleLoader for ModuleCache<'_> {
    fn load(&mut self, path: Name) -> EvalResult {
        let Some(module) = self.modules.get(&path) else {
            internal_error(format_args!(
                "module `{}` executed before it was checked",
                self.interner.lookup(path)
            ))
        };
        if let Some(exports) = &module.exports {
            return Ok(exports.clone());
        }
        tracing::debug!(path = self.interner.lookup(path), "executing module");
        let program = Rc::clone(&module.program);
        let (interner, debug, globals) = (self.interner, self.debug, Rc::clone(&self.globals));
        let exports = Interpreter::new(program, globals, interner, debug, self).run_module()?;
        if let Some(module) = self.modules.get_mut(&path) {
            module.exports = Some(exports.clone());
        }
        Ok(exports)
    }
}
