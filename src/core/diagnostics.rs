//! Diagnostics port for informational messages.
//!
//! The facade reports what it is about to do through this port instead of a
//! process-wide logger, so callers can swap the sink.

use parking_lot::Mutex;

/// Sink for informational diagnostics.
///
/// Implementations must not fail or block; messages are fire-and-forget.
pub trait Diagnostics: Send + Sync {
    /// Record an informational message.
    fn info(&self, message: &str);
}

/// Emits diagnostics as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn info(&self, message: &str) {
        tracing::info!(target: "suna_compat::facade", "{message}");
    }
}

/// Discards all diagnostics.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDiagnostics;

impl Diagnostics for NoopDiagnostics {
    fn info(&self, _message: &str) {}
}

/// Keeps diagnostics in memory.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    messages: Mutex<Vec<String>>,
}

impl RecordingDiagnostics {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages recorded so far, oldest first.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    /// Remove and return all recorded messages.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.messages.lock())
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn info(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}

impl<T: Diagnostics + ?Sized> Diagnostics for std::sync::Arc<T> {
    fn info(&self, message: &str) {
        (**self).info(message);
    }
}
