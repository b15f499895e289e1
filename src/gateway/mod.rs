//! Gateway transport: configuration, response shaping, and the HTTP
//! client. The [`FiscalGateway`] trait is the seam the engine depends
//! on, so tests run against a fake instead of the network.

mod client;
mod config;
mod types;

pub use client::{HttpGateway, validate_justification};
pub use config::{Environment, GatewayConfig};
pub use types::{
    CompanyRegistration, DocumentUrls, GatewayReceipt, GatewayStatus, RAW_BODY_LIMIT,
    truncate_body,
};

use crate::core::{Error, MerchantFiscalProfile};
use crate::payload::DocumentPayload;

/// Cancellation justification length bounds imposed by the authority.
pub const JUSTIFICATION_MIN: usize = 15;
pub const JUSTIFICATION_MAX: usize = 255;

/// The four gateway operations the engine drives.
///
/// `correlation_ref` is caller-supplied and globally unique per document;
/// the gateway deduplicates on it, which is what makes retries idempotent.
#[allow(async_fn_in_trait)]
pub trait FiscalGateway {
    /// Register the merchant with the gateway, or update the existing
    /// registration when `existing_ref` is known.
    async fn register_company(
        &self,
        profile: &MerchantFiscalProfile,
        existing_ref: Option<&str>,
    ) -> Result<CompanyRegistration, Error>;

    /// File a document for authorization under `correlation_ref`.
    /// Resubmission under the same reference must not create a duplicate
    /// authority filing.
    async fn submit_document(
        &self,
        correlation_ref: &str,
        payload: &DocumentPayload,
    ) -> Result<GatewayReceipt, Error>;

    /// Refresh the authorization outcome. Safe to call repeatedly; a
    /// "not yet processed" response is a normal `Pending` receipt.
    async fn poll_status(&self, correlation_ref: &str) -> Result<GatewayReceipt, Error>;

    /// Cancel an authorized document. Implementations reject a
    /// justification outside 15–255 characters before any network call.
    async fn cancel_document(
        &self,
        correlation_ref: &str,
        justification: &str,
    ) -> Result<GatewayReceipt, Error>;
}
