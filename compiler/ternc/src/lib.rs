//! Tern driver.
//!
//! Entry points over an already-built AST:
//! - [`type_check`]: check a module and every module it imports; returns the
//!   type of its export record
//! - [`exec`]: check, then run; returns the export record itself
//!
//! Imports resolve through [`ModuleCache`], which checks and runs each
//! imported module at most once per call.

mod error;
mod modules;

use std::rc::Rc;
use std::sync::Once;

use tern_eval::{Globals, Interpreter, Program, Value};
use tern_ir::{stdout_handler, Ast, Name, SharedDebugHandler, SharedInterner};
use tern_types::{check_module, GenericIdGen, Type};

pub use error::Error;
pub use modules::{ModuleCache, ModuleDefinitions};

/// Inputs to [`type_check`].
#[derive(Clone)]
pub struct TypeCheckOptions {
    /// Interner every AST of this compilation was built with.
    pub interner: SharedInterner,
    pub module_definitions: ModuleDefinitions,
    /// Names and types of the globals available to every module.
    pub std_lib_shape: Vec<(Name, Type)>,
    pub behaviors: SharedDebugHandler,
}

impl TypeCheckOptions {
    /// No modules, no standard library, `print` types dropped.
    pub fn new(interner: SharedInterner) -> Self {
        TypeCheckOptions {
            interner,
            module_definitions: ModuleDefinitions::default(),
            std_lib_shape: Vec::new(),
            behaviors: stdout_handler(),
        }
    }

    #[must_use]
    pub fn with_module(mut self, path: &str, ast: impl Into<Rc<Ast>>) -> Self {
        let path = self.interner.intern(path);
        self.module_definitions.insert(path, ast.into());
        self
    }

    #[must_use]
    pub fn with_behaviors(mut self, behaviors: SharedDebugHandler) -> Self {
        self.behaviors = behaviors;
        self
    }
}

/// Inputs to [`exec`].
#[derive(Clone)]
pub struct ExecOptions {
    /// Interner every AST of this compilation was built with.
    pub interner: SharedInterner,
    pub module_definitions: ModuleDefinitions,
    /// Globals available to every module; their types form the checker's
    /// standard-library shape.
    pub std_lib: Vec<(Name, Value)>,
    pub behaviors: SharedDebugHandler,
}

impl ExecOptions {
    /// No modules, no standard library, `print` to stdout.
    pub fn new(interner: SharedInterner) -> Self {
        ExecOptions {
            interner,
            module_definitions: ModuleDefinitions::default(),
            std_lib: Vec::new(),
            behaviors: stdout_handler(),
        }
    }

    #[must_use]
    pub fn with_module(mut self, path: &str, ast: impl Into<Rc<Ast>>) -> Self {
        let path = self.interner.intern(path);
        self.module_definitions.insert(path, ast.into());
        self
    }

    #[must_use]
    pub fn with_global(mut self, name: &str, value: Value) -> Self {
        let name = self.interner.intern(name);
        self.std_lib.push((name, value));
        self
    }

    #[must_use]
    pub fn with_behaviors(mut self, behaviors: SharedDebugHandler) -> Self {
        self.behaviors = behaviors;
        self
    }
}

/// Type-check `ast` and its imports.
#[tracing::instrument(level = "debug", skip_all)]
pub fn type_check(ast: &Ast, options: &TypeCheckOptions) -> Result<Type, Error> {
    let ids = GenericIdGen::new();
    let mut cache = ModuleCache::new(
        &options.interner,
        &ids,
        &options.module_definitions,
        &options.std_lib_shape,
        &options.behaviors,
        Rc::default(),
    );
    let checked = check_module(
        ast,
        &options.interner,
        &ids,
        &options.std_lib_shape,
        &options.behaviors,
        &mut cache,
    )?;
    Ok(checked.exports)
}

/// Type-check, then evaluate `ast`. Nothing runs if checking fails.
#[tracing::instrument(level = "debug", skip_all)]
pub fn exec(ast: impl Into<Rc<Ast>>, options: &ExecOptions) -> Result<Value, Error> {
    let ast = ast.into();
    let ids = GenericIdGen::new();
    let shape: Vec<(Name, Type)> = options
        .std_lib
        .iter()
        .map(|(name, value)| (*name, value.ty.clone()))
        .collect();
    let globals: Rc<Globals> = Rc::new(options.std_lib.iter().cloned().collect());
    let mut cache = ModuleCache::new(
        &options.interner,
        &ids,
        &options.module_definitions,
        &shape,
        &options.behaviors,
        Rc::clone(&globals),
    );
    let checked = check_module(
        &ast,
        &options.interner,
        &ids,
        &shape,
        &options.behaviors,
        &mut cache,
    )?;
    let program = Program::new(ast, checked);
    let interpreter = Interpreter::new(
        program,
        globals,
        &options.interner,
        &options.behaviors,
        &mut cache,
    );
    interpreter.run_module().map_err(Error::Runtime)
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing output.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set, e.g.
/// `RUST_LOG=tern_types=trace,tern_eval=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
