//! Status reconciliation: polling the gateway for pending documents and
//! applying the observed transition exactly once.

use chrono::Utc;

use crate::core::{DocumentStatus, Error, FiscalDocument, FiscalEvent, FiscalEventKind};
use crate::gateway::FiscalGateway;

use super::{AuthorizationHook, DocumentStore, FiscalEngine, StatusOutcome, apply_authorization};

impl<G: FiscalGateway, H: AuthorizationHook> FiscalEngine<G, H> {
    /// Refresh the authorization outcome of a pending document.
    ///
    /// Idempotent: a poll that observes no status change persists nothing
    /// and appends no event. The on-authorized hook fires only on the
    /// transition edge, so re-running after authorization never dispatches
    /// the side effect twice.
    pub async fn check_status<S: DocumentStore>(
        &mut self,
        store: &mut S,
        tenant_id: u64,
        document_id: u64,
    ) -> Result<StatusOutcome, Error> {
        let mut document = store.load_document(tenant_id, document_id)?;

        // Only submitted documents have an outcome worth polling for;
        // anything else reports its stored state without a gateway call.
        let Some(reference) = document.gateway_ref.clone() else {
            return Ok(outcome_of(&document, Default::default()));
        };
        if document.status != DocumentStatus::Submitted {
            return Ok(outcome_of(&document, Default::default()));
        }

        // A transport failure here changes nothing: the document stays
        // `submitted` and safe to re-poll.
        let receipt = self.gateway.poll_status(&reference).await?;
        let mapped = receipt.status.to_document_status();

        if mapped == document.status {
            return Ok(outcome_of(&document, receipt.document_urls));
        }

        match mapped {
            DocumentStatus::Authorized => {
                apply_authorization(&mut document, &receipt);
                store.save_document(&document)?;
                store.append_event(FiscalEvent::now(
                    document_id,
                    tenant_id,
                    FiscalEventKind::Authorized,
                    receipt.raw_body.clone(),
                ))?;
                self.hook.on_authorized(&document);
            }
            DocumentStatus::Rejected => {
                document.status = DocumentStatus::Rejected;
                document.authority_message = receipt.authority_message.clone();
                store.save_document(&document)?;
                store.append_event(FiscalEvent::now(
                    document_id,
                    tenant_id,
                    FiscalEventKind::Rejected,
                    receipt.raw_body.clone(),
                ))?;
            }
            DocumentStatus::Cancelled => {
                document.status = DocumentStatus::Cancelled;
                document.authority_message = receipt.authority_message.clone();
                if document.cancelled_at.is_none() {
                    document.cancelled_at = Some(Utc::now());
                }
                store.save_document(&document)?;
                store.append_event(FiscalEvent::now(
                    document_id,
                    tenant_id,
                    FiscalEventKind::StatusCheck,
                    receipt.raw_body.clone(),
                ))?;
            }
            // mapped == Submitted was handled by the no-op branch above;
            // Draft is not in the gateway vocabulary.
            DocumentStatus::Submitted | DocumentStatus::Draft => {}
        }

        Ok(outcome_of(&document, receipt.document_urls))
    }
}

fn outcome_of(
    document: &FiscalDocument,
    document_urls: crate::gateway::DocumentUrls,
) -> StatusOutcome {
    StatusOutcome {
        status: document.status,
        access_key: document.access_key.clone(),
        document_urls,
    }
}
