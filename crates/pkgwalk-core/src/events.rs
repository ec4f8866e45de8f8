//! Fire-and-forget diagnostic events.
//!
//! Some operations must report problems without failing: an existence check
//! that hits a recorded package error still answers `false`, and a directory
//! walk that finds a broken subtree still enumerates the rest. Those
//! diagnostics flow through an [`EventHandler`] passed in by the caller.

use std::fmt;
use std::sync::Mutex;

/// How serious an event is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// A diagnostic emitted while answering a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub severity: Severity,
    pub message: String,
}

impl Event {
    pub fn error(message: impl Into<String>) -> Self {
        Event { severity: Severity::Error, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Event { severity: Severity::Warning, message: message.into() }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Event { severity: Severity::Info, message: message.into() }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        };
        write!(f, "{}: {}", severity, self.message)
    }
}

/// Sink for diagnostics that must not abort the operation reporting them.
///
/// Handlers are invoked from multiple threads, possibly concurrently, and
/// should not block. There is no return value: reporting never fails.
pub trait EventHandler: Send + Sync {
    fn handle(&self, event: Event);
}

/// Forwards each event to the `tracing` subscriber at the matching level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingHandler;

impl EventHandler for TracingHandler {
    fn handle(&self, event: Event) {
        match event.severity {
            Severity::Error => tracing::error!("{}", event.message),
            Severity::Warning => tracing::warn!("{}", event.message),
            Severity::Info => tracing::info!("{}", event.message),
        }
    }
}

/// Keeps every event it sees. Useful for asserting on diagnostics in tests.
#[derive(Debug, Default)]
pub struct CollectingHandler {
    events: Mutex<Vec<Event>>,
}

impl CollectingHandler {
    pub fn new() -> Self {
        CollectingHandler::default()
    }

    /// All events handled so far, in arrival order.
    pub fn events(&self) -> Vec<Event> {
        match self.events.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => Vec::new(),
        }
    }
}

impl EventHandler for CollectingHandler {
    fn handle(&self, event: Event) {
        if let Ok(mut guard) = self.events.lock() {
            guard.push(event);
        }
    }
}

/// Discards everything. For callers that have nowhere to report to.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHandler;

impl EventHandler for NullHandler {
    fn handle(&self, _event: Event) {}
}
