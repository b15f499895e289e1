use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Append-only audit row. Never mutated or deleted — the only source of
/// historical truth for support and debugging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiscalEvent {
    pub document_id: u64,
    pub tenant_id: u64,
    pub kind: FiscalEventKind,
    /// Raw external response body (truncated by the gateway client), or a
    /// short engine-side description when no external call was involved.
    pub payload: String,
    pub recorded_at: DateTime<Utc>,
}

impl FiscalEvent {
    pub fn now(document_id: u64, tenant_id: u64, kind: FiscalEventKind, payload: impl Into<String>) -> Self {
        Self {
            document_id,
            tenant_id,
            kind,
            payload: payload.into(),
            recorded_at: Utc::now(),
        }
    }
}

/// What a [`FiscalEvent`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FiscalEventKind {
    /// Document filed with the gateway, outcome pending.
    Submitted,
    /// Authority authorized the document.
    Authorized,
    /// A poll observed the authority's rejection of a pending document.
    Rejected,
    /// Document cancelled with the authority.
    Cancelled,
    /// A poll observed a cancellation filed outside this engine.
    StatusCheck,
    /// Submission attempt failed before or at the gateway.
    SubmissionError,
    /// Cancellation attempt failed at the gateway.
    CancelError,
}

impl FiscalEventKind {
    /// Stable string form, matching the persisted representation.
    pub fn as_str(self) -> &'static str {
        match self {
            FiscalEventKind::Submitted => "submitted",
            FiscalEventKind::Authorized => "authorized",
            FiscalEventKind::Rejected => "rejected",
            FiscalEventKind::Cancelled => "cancelled",
            FiscalEventKind::StatusCheck => "status_check",
            FiscalEventKind::SubmissionError => "submission_error",
            FiscalEventKind::CancelError => "cancel_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_serializes_snake_case() {
        let json = serde_json::to_string(&FiscalEventKind::SubmissionError).unwrap();
        assert_eq!(json, "\"submission_error\"");
        assert_eq!(FiscalEventKind::SubmissionError.as_str(), "submission_error");
    }
}
