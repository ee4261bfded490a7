//! Append-only diagnostic status log.
//!
//! Both the session controller and the endpoint orchestrator append lines
//! here while a request is in flight. Entries are only ever appended, never
//! rewritten, so the log is safe to write from any point in the pipeline.
//! Visibility toggling and clearing happen only on explicit user action.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::session::EndpointAttempt;

/// Severity of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// One timestamped diagnostic line.
#[derive(Debug, Clone)]
pub struct StatusEntry {
    pub at: chrono::DateTime<chrono::Utc>,
    pub level: StatusLevel,
    pub message: String,
}

/// Append-only log of session and orchestration events.
#[derive(Debug)]
pub struct StatusLog {
    entries: Mutex<Vec<StatusEntry>>,
    attempts: Mutex<Vec<EndpointAttempt>>,
    visible: AtomicBool,
}

impl Default for StatusLog {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusLog {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            attempts: Mutex::new(Vec::new()),
            visible: AtomicBool::new(true),
        }
    }

    /// Append one line.
    pub fn append(&self, level: StatusLevel, message: impl Into<String>) {
        self.entries.lock().push(StatusEntry {
            at: chrono::Utc::now(),
            level,
            message: message.into(),
        });
    }

    pub fn info(&self, message: impl Into<String>) {
        self.append(StatusLevel::Info, message);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.append(StatusLevel::Success, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.append(StatusLevel::Warning, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.append(StatusLevel::Error, message);
    }

    /// Record one endpoint try.
    pub fn record_attempt(&self, attempt: EndpointAttempt) {
        self.attempts.lock().push(attempt);
    }

    /// Snapshot of all lines in append order.
    pub fn entries(&self) -> Vec<StatusEntry> {
        self.entries.lock().clone()
    }

    /// Snapshot of all recorded endpoint attempts.
    pub fn attempts(&self) -> Vec<EndpointAttempt> {
        self.attempts.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Flip visibility, returning the new state.
    pub fn toggle_visibility(&self) -> bool {
        !self.visible.fetch_xor(true, Ordering::SeqCst)
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }

    /// Explicit user-initiated clear. Leaves a single sentinel line so the
    /// log never reads as if nothing ever happened.
    pub fn clear(&self) {
        let mut entries = self.entries.lock();
        entries.clear();
        entries.push(StatusEntry {
            at: chrono::Utc::now(),
            level: StatusLevel::Info,
            message: "Log cleared".to_string(),
        });
        self.attempts.lock().clear();
    }
}
