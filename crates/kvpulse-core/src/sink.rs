//! Error-logging sink seam.
//!
//! Collection failures are observable only through this sink, never through
//! `emit`'s return value, so the sink is injected rather than hard-wired:
//! production uses [`TracingSink`], tests substitute [`RecordingSink`] and
//! assert on the captured events.

use std::sync::Mutex;

use crate::error::KvPulseError;

/// Structured error-event sink.
pub trait ErrorSink: Send + Sync {
    /// Report one failure event with optional structured key-value context.
    fn error(&self, event: &'static str, error: &KvPulseError, data: &[(&'static str, String)]);
}

/// Production sink forwarding to `tracing::error!`.
#[derive(Debug, Default)]
pub struct TracingSink;

impl ErrorSink for TracingSink {
    fn error(&self, event: &'static str, error: &KvPulseError, data: &[(&'static str, String)]) {
        if data.is_empty() {
            tracing::error!(target: "kvpulse", error = %error, "{event}");
        } else {
            let data = data
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join(" ");
            tracing::error!(target: "kvpulse", error = %error, %data, "{event}");
        }
    }
}

/// One event captured by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedEvent {
    pub event: &'static str,
    pub error: String,
    pub data: Vec<(&'static str, String)>,
}

/// Test double that records every event for later assertions.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<RecordedEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain and return everything recorded so far.
    pub fn take(&self) -> Vec<RecordedEvent> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl ErrorSink for RecordingSink {
    fn error(&self, event: &'static str, error: &KvPulseError, data: &[(&'static str, String)]) {
        let recorded = RecordedEvent {
            event,
            error: error.to_string(),
            data: data.to_vec(),
        };
        match self.events.lock() {
            Ok(mut events) => events.push(recorded),
            Err(poisoned) => poisoned.into_inner().push(recorded),
        }
    }
}
