use serde::Serialize;
use uuid::Uuid;

use crate::verdict::{RejectCode, Verdict};

/// Longest preview of the query an audit record may carry.
///
/// Rejected input is attacker-influenced, so the full text never reaches
/// the log; operators get a bounded prefix.
pub const PREVIEW_MAX_CHARS: usize = 120;

/// One structured log event per validation call, regardless of verdict.
///
/// Created once, never mutated; handed to whatever logging sink the caller
/// uses. Contains no full query text.
#[derive(Debug, Clone, Serialize)]
pub struct AuditRecord {
    /// Correlates this validation with the surrounding request.
    pub correlation_id: Uuid,
    /// Bounded, control-character-free prefix of the query.
    pub preview: String,
    /// Whether the query was cleared for execution.
    pub admitted: bool,
    /// Rejection code, absent on admission.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<RejectCode>,
}

impl AuditRecord {
    /// Build the record for one validation call with a fresh correlation id.
    pub fn new(query: &str, verdict: &Verdict) -> Self {
        Self::with_correlation_id(Uuid::new_v4(), query, verdict)
    }

    /// Build the record under a caller-supplied correlation id.
    pub fn with_correlation_id(correlation_id: Uuid, query: &str, verdict: &Verdict) -> Self {
        Self {
            correlation_id,
            preview: preview(query),
            admitted: verdict.is_admitted(),
            code: verdict.code(),
        }
    }
}

/// Bounded preview: control characters become spaces, truncation happens on
/// a character boundary and is marked with an ellipsis.
pub fn preview(query: &str) -> String {
    let mut out = String::with_capacity(PREVIEW_MAX_CHARS);
    let mut truncated = false;

    for (count, ch) in query.chars().enumerate() {
        if count >= PREVIEW_MAX_CHARS {
            truncated = true;
            break;
        }
        out.push(if ch.is_control() { ' ' } else { ch });
    }

    if truncated {
        out.push('…');
    }
    out
}
