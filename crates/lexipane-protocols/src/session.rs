//! Per-session request and attempt records.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One user-initiated explanation request.
///
/// Created per user action, immutable, discarded when the session completes.
#[derive(Debug, Clone)]
pub struct ExplanationRequest {
    pub source_text: String,
    pub request_id: Uuid,
    pub start_time: chrono::DateTime<chrono::Utc>,
}

impl ExplanationRequest {
    /// Create a request for a non-empty source text.
    ///
    /// Returns `None` when the text is empty after trimming.
    pub fn new(source_text: impl Into<String>) -> Option<Self> {
        let source_text = source_text.into();
        if source_text.trim().is_empty() {
            return None;
        }
        Some(Self {
            source_text,
            request_id: Uuid::new_v4(),
            start_time: chrono::Utc::now(),
        })
    }

    /// Seconds elapsed since the request started.
    pub fn elapsed_seconds(&self) -> f64 {
        let elapsed = chrono::Utc::now() - self.start_time;
        elapsed.num_milliseconds() as f64 / 1000.0
    }
}

/// Session-ownership token enforcing the single-flight guarantee.
///
/// Checked synchronously before any suspension point; at most one session
/// may hold `Active` at a time. A second request arriving while a session
/// is in flight is refused, never queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Active(Uuid),
}

impl SessionState {
    pub fn is_active(&self) -> bool {
        matches!(self, SessionState::Active(_))
    }
}

/// Record of one endpoint try, appended to the attempt log for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointAttempt {
    pub url: String,
    pub ordinal: usize,
    pub outcome: AttemptOutcome,
    pub latency: Duration,
}

/// How an endpoint try ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptOutcome {
    Success,
    HttpError(u16),
    NetworkError,
    Timeout,
    MalformedResponse,
}
