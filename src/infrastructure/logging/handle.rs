use std::fmt::Display;

use tracing::{debug, error, info, info_span, trace, warn, Span};

/// Named logger handle
///
/// Every event carries a `logger` field with the handle's name and is emitted
/// inside a `logger{name=<name>}` span. Event targets stay the calling module,
/// so select a logger by name with a span directive, e.g.
/// `RUST_LOG='[logger{name=training}]=debug'`.
///
/// The span is created against the subscriber active when the handle is
/// built; create handles after [`configure`](super::configure) for span
/// filtering to apply.
#[derive(Debug, Clone)]
pub struct Logger {
    name: String,
    span: Span,
}

impl Logger {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let span = info_span!("logger", name = %name);
        Self { name, span }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run `f` inside this logger's span
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        self.span.in_scope(f)
    }

    pub fn trace(&self, message: impl Display) {
        self.in_scope(|| trace!(logger = %self.name, "{message}"));
    }

    pub fn debug(&self, message: impl Display) {
        self.in_scope(|| debug!(logger = %self.name, "{message}"));
    }

    pub fn info(&self, message: impl Display) {
        self.in_scope(|| info!(logger = %self.name, "{message}"));
    }

    pub fn warn(&self, message: impl Display) {
        self.in_scope(|| warn!(logger = %self.name, "{message}"));
    }

    pub fn error(&self, message: impl Display) {
        self.in_scope(|| error!(logger = %self.name, "{message}"));
    }
}

/// Get a named logger handle
pub fn get_logger(name: &str) -> Logger {
    Logger::new(name)
}
