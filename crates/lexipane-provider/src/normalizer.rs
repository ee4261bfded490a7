//! Response normalizer.
//!
//! Converts a raw provider reply into the canonical explanation record.
//! Replies sometimes arrive wrapped in a fenced code block labeled `json`;
//! the wrapper is stripped before parsing. Schema validation is the single
//! source of truth for success: anything that is not the strict JSON
//! object is a malformed response, never a best-effort rendering.

use std::sync::LazyLock;

use regex::Regex;

use lexipane_protocols::error::ExplainError;
use lexipane_protocols::explanation::CanonicalExplanation;

static JSON_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```json\s*(.*?)\s*```").expect("valid fence pattern"));

/// Normalize a raw reply into a validated [`CanonicalExplanation`].
pub fn normalize(raw: &str) -> Result<CanonicalExplanation, ExplainError> {
    let body = strip_json_fence(raw);
    let record: CanonicalExplanation = serde_json::from_str(body)
        .map_err(|e| ExplainError::MalformedResponse(format!("not valid JSON: {e}")))?;
    record
        .validate()
        .map_err(ExplainError::MalformedResponse)?;
    Ok(record)
}

/// Strip one optional ```json fenced wrapper, returning the captured body.
fn strip_json_fence(raw: &str) -> &str {
    match JSON_FENCE.captures(raw) {
        Some(captures) => captures.get(1).map_or(raw, |m| m.as_str()),
        None => raw.trim(),
    }
}

#[cfg(test)]
#[path = "normalizer_tests.rs"]
mod tests;
