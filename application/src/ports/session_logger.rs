//! Port for structured session logging.
//!
//! Defines the [`SessionLogger`] trait for recording game events (questions,
//! answers, the final guess) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the full
//! game transcript in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured session event for logging.
pub struct SessionEvent {
    /// Event type identifier (e.g., "question_asked", "session_finished").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl SessionEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging session events to a structured log.
///
/// `log` is synchronous and infallible; implementations drop records they
/// cannot write.
pub trait SessionLogger: Send + Sync {
    /// Record a session event.
    fn log(&self, event: SessionEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoSessionLogger;

impl SessionLogger for NoSessionLogger {
    fn log(&self, _event: SessionEvent) {}
}

/// In-memory logger, mainly for tests.
#[derive(Default)]
pub struct MemorySessionLogger {
    events: std::sync::Mutex<Vec<(String, Value)>>,
}

impl MemorySessionLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Event types recorded so far, in order
    pub fn event_types(&self) -> Vec<String> {
        self.events
            .lock()
            .map(|events| events.iter().map(|(t, _)| t.clone()).collect())
            .unwrap_or_default()
    }

    /// Payloads recorded under `event_type`
    pub fn payloads(&self, event_type: &str) -> Vec<Value> {
        self.events
            .lock()
            .map(|events| {
                events
                    .iter()
                    .filter(|(t, _)| t == event_type)
                    .map(|(_, p)| p.clone())
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl SessionLogger for MemorySessionLogger {
    fn log(&self, event: SessionEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push((event.event_type.to_string(), event.payload));
        }
    }
}
