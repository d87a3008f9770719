//! Native stack growth for tree-walking recursion.
//!
//! Both the checker and the evaluator recurse once per AST level, and the
//! evaluator additionally recurses once per Tern function call. Deeply nested
//! blocks or long recursive Tern programs would otherwise exhaust the thread
//! stack before the interpreter's own call-depth limit is reached.
//!
//! On `wasm32` the helper is a plain call.

/// Grow when less than this much stack remains.
const RED_ZONE: usize = 128 * 1024;

/// Size of each freshly allocated stack segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first switching to a new stack segment if the current one is
/// nearly exhausted.
///
/// Wrap the body of every function that recurses on child nodes:
///
/// ```text
/// fn check_node(&mut self, id: NodeId, state: &TypeState) -> CheckResult {
///     ensure_sufficient_stack(|| self.check_node_inner(id, state))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
