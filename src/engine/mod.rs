//! Orchestration: the four lifecycle entry points.
//!
//! Each operation is a short-lived, stateless unit of work — load, one
//! gateway attempt, one persisted outcome, at most one audit event. A
//! caller wanting retry-with-backoff wraps these; the engine itself
//! never loops.

mod cancel;
mod company;
mod hooks;
mod reconcile;
mod store;
mod submit;

pub use hooks::{AuthorizationHook, NoopHook, OrderService, ShipmentDispatcher, ShipmentService};
pub use store::{DocumentStore, MemoryStore};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::core::{DocumentStatus, FiscalDocument};
use crate::gateway::{DocumentUrls, FiscalGateway, GatewayReceipt};

/// The fiscal document lifecycle engine.
///
/// Holds the gateway transport and the on-authorized hook; all document
/// state lives in the [`DocumentStore`] passed to each call.
pub struct FiscalEngine<G, H> {
    pub(crate) gateway: G,
    pub(crate) hook: H,
}

impl<G: FiscalGateway, H: AuthorizationHook> FiscalEngine<G, H> {
    pub fn new(gateway: G, hook: H) -> Self {
        Self { gateway, hook }
    }

    /// Access the underlying gateway, e.g. to inspect a test double.
    pub fn gateway_ref(&self) -> &G {
        &self.gateway
    }
}

/// Entry-point response of `submit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitOutcome {
    pub status: DocumentStatus,
    pub authority_message: Option<String>,
    pub access_key: Option<String>,
}

/// Entry-point response of `check_status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusOutcome {
    pub status: DocumentStatus,
    pub access_key: Option<String>,
    pub document_urls: DocumentUrls,
}

/// Entry-point response of `cancel`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelOutcome {
    pub status: DocumentStatus,
}

/// Entry-point response of `sync_company`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanySyncOutcome {
    pub company_ref: String,
    pub certificate_expiry: Option<chrono::DateTime<Utc>>,
}

/// Stamp the authority-issued identifiers on the first transition into
/// `Authorized`. Identifiers and the authorization timestamp are set
/// once and never overwritten by later receipts.
pub(crate) fn apply_authorization(document: &mut FiscalDocument, receipt: &GatewayReceipt) {
    document.status = DocumentStatus::Authorized;
    if document.access_key.is_none() {
        document.access_key = receipt.access_key.clone();
    }
    if document.protocol.is_none() {
        document.protocol = receipt.protocol.clone();
    }
    if let Some(number) = receipt.number {
        document.number = number;
    }
    if let Some(series) = receipt.series {
        document.series = series;
    }
    document.authority_message = receipt.authority_message.clone();
    if document.authorized_at.is_none() {
        document.authorized_at = Some(Utc::now());
    }
}
