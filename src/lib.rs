//! # notafiscal
//!
//! Brazilian NF-e fiscal document lifecycle engine: builds
//! authority-compliant authorization requests from merchant and order
//! data, submits them through a third-party gateway, reconciles
//! asynchronous authorization outcomes, and drives downstream side
//! effects (shipment creation) exactly once.
//!
//! All monetary values use [`rust_decimal::Decimal`] — never floating
//! point. Amounts round half-up to 2 decimal places, unit prices to 4,
//! at payload construction and nowhere else.
//!
//! ## Lifecycle
//!
//! ```text
//! draft → submitted → {authorized | rejected}
//! rejected → submitted            (resubmission after correction)
//! authorized → cancelled
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use notafiscal::core::{DocumentStatus, correlation_ref};
//!
//! // Deterministic per-document reference: retries and concurrent
//! // submissions collapse to one external filing.
//! assert_eq!(correlation_ref(7, 1234), "nfe-7-1234");
//!
//! assert!(DocumentStatus::Draft.can_transition(DocumentStatus::Submitted));
//! assert!(!DocumentStatus::Draft.can_transition(DocumentStatus::Cancelled));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Entities, status machine, errors, audit events |
//! | `payload` | Authority payload builder (sanitization, codes, rounding) |
//! | `gateway` | HTTP gateway client and the `FiscalGateway` seam |
//! | `engine` | Submit / check-status / cancel / company-sync orchestration |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "payload")]
pub mod payload;

#[cfg(feature = "gateway")]
pub mod gateway;

#[cfg(feature = "engine")]
pub mod engine;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
