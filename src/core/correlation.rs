//! Correlation reference derivation.
//!
//! The gateway deduplicates filings by a caller-chosen reference. Deriving
//! it deterministically from the document identity makes retries and
//! concurrent submissions of the same document collapse to one external
//! filing instead of creating duplicates.

/// Derive the gateway correlation reference for a document.
///
/// Stable: the same document always yields the same reference, so a
/// resubmission after rejection reuses the reference of the failed
/// attempt. Unique: distinct (tenant, document) pairs can never collide
/// because both components appear positionally in a fixed format.
pub fn correlation_ref(tenant_id: u64, document_id: u64) -> String {
    format!("nfe-{tenant_id}-{document_id}")
}
