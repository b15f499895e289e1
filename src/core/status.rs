use serde::{Deserialize, Serialize};

/// Lifecycle status of a fiscal document.
///
/// The only legal transitions are:
///
/// ```text
/// draft → submitted → {authorized | rejected}
/// rejected → submitted          (resubmission after correction)
/// authorized → cancelled
/// ```
///
/// Nothing leaves `Cancelled`, and there is no direct edge from
/// `Draft` or `Rejected` to `Cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    /// Being assembled by the collecting UI; never seen by the authority.
    Draft,
    /// Filed with the gateway, authorization outcome pending.
    Submitted,
    /// Authorized by the tax authority; access key and protocol are set.
    Authorized,
    /// Refused by the authority or failed in transport; resubmittable.
    Rejected,
    /// Irreversibly cancelled with the authority.
    Cancelled,
}

impl DocumentStatus {
    /// Whether the lifecycle permits moving from `self` to `to`.
    pub fn can_transition(self, to: DocumentStatus) -> bool {
        use DocumentStatus::*;
        matches!(
            (self, to),
            (Draft, Submitted)
                | (Submitted, Authorized)
                | (Submitted, Rejected)
                | (Submitted, Cancelled)
                | (Rejected, Submitted)
                | (Authorized, Cancelled)
        )
    }

    /// Statuses from which a (re)submission may start.
    pub fn is_submittable(self) -> bool {
        matches!(self, DocumentStatus::Draft | DocumentStatus::Rejected)
    }

    /// Stable string form, matching the persisted representation.
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentStatus::Draft => "draft",
            DocumentStatus::Submitted => "submitted",
            DocumentStatus::Authorized => "authorized",
            DocumentStatus::Rejected => "rejected",
            DocumentStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
