//! Debug-output behaviors for `print` nodes.
//!
//! Both phases report through the same handler:
//! - type checking calls [`DebugHandler::on_debug_type`] with the rendered
//!   static type of the printed expression
//! - evaluation calls [`DebugHandler::on_debug_value`] with the rendered value
//!
//! Test harnesses install a buffer handler and assert on what was observed
//! instead of scraping stdout.
//!
//! # Performance
//! Uses enum dispatch instead of trait objects on this frequently-used path.

use std::sync::Arc;

use parking_lot::Mutex;

/// Handler that captures debug output in memory.
#[derive(Default)]
pub struct BufferDebugHandler {
    types: Mutex<Vec<String>>,
    values: Mutex<Vec<String>>,
}

impl BufferDebugHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Static types observed during type checking, in order.
    pub fn types(&self) -> Vec<String> {
        self.types.lock().clone()
    }

    /// Values observed during evaluation, in order.
    pub fn values(&self) -> Vec<String> {
        self.values.lock().clone()
    }

    /// Clear captured output.
    pub fn clear(&self) {
        self.types.lock().clear();
        self.values.lock().clear();
    }
}

/// Debug-output handler.
pub enum DebugHandler {
    /// Writes values to stdout; type observations are dropped.
    Stdout,
    /// Captures both observations (testing).
    Buffer(BufferDebugHandler),
    /// Discards all output.
    Silent,
}

impl DebugHandler {
    /// Called once per `print` node during type checking.
    pub fn on_debug_type(&self, rendered: &str) {
        match self {
            Self::Buffer(h) => h.types.lock().push(rendered.to_string()),
            Self::Stdout | Self::Silent => {}
        }
    }

    /// Called each time a `print` node is evaluated.
    pub fn on_debug_value(&self, rendered: &str) {
        match self {
            Self::Stdout => println!("{rendered}"),
            Self::Buffer(h) => h.values.lock().push(rendered.to_string()),
            Self::Silent => {}
        }
    }

    /// Captured type observations (empty unless buffering).
    pub fn captured_types(&self) -> Vec<String> {
        match self {
            Self::Buffer(h) => h.types(),
            Self::Stdout | Self::Silent => Vec::new(),
        }
    }

    /// Captured value observations (empty unless buffering).
    pub fn captured_values(&self) -> Vec<String> {
        match self {
            Self::Buffer(h) => h.values(),
            Self::Stdout | Self::Silent => Vec::new(),
        }
    }
}

/// Shared debug handler passed to both phases.
pub type SharedDebugHandler = Arc<DebugHandler>;

/// Create a stdout handler.
pub fn stdout_handler() -> SharedDebugHandler {
    Arc::new(DebugHandler::Stdout)
}

/// Create a capturing handler.
pub fn buffer_handler() -> SharedDebugHandler {
    Arc::new(DebugHandler::Buffer(BufferDebugHandler::new()))
}

/// Create a handler that discards everything.
pub fn silent_handler() -> SharedDebugHandler {
    Arc::new(DebugHandler::Silent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_captures_in_order() {
        let handler = buffer_handler();
        handler.on_debug_type("Int");
        handler.on_debug_value("5");
        handler.on_debug_value("6");
        assert_eq!(handler.captured_types(), vec!["Int".to_string()]);
        assert_eq!(
            handler.captured_values(),
            vec!["5".to_string(), "6".to_string()]
        );
    }

    #[test]
    fn test_buffer_clear() {
        let handler = BufferDebugHandler::new();
        handler.types.lock().push("Int".into());
        handler.clear();
        assert!(handler.types().is_empty());
    }

    #[test]
    fn test_silent_captures_nothing() {
        let handler = silent_handler();
        handler.on_debug_value("5");
        assert!(handler.captured_values().is_empty());
    }
}
