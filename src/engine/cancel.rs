//! Cancellation: an irreversible transition, taken only from
//! `authorized` and only after the authority confirms.

use chrono::Utc;

use crate::core::{DocumentStatus, Error, FiscalEvent, FiscalEventKind};
use crate::gateway::{FiscalGateway, GatewayStatus, validate_justification};

use super::{AuthorizationHook, CancelOutcome, DocumentStore, FiscalEngine};

impl<G: FiscalGateway, H: AuthorizationHook> FiscalEngine<G, H> {
    /// Cancel an authorized document with the authority.
    ///
    /// Gateway failure leaves the document `authorized` and records a
    /// `cancel_error` event — never a silent swallow, never a state
    /// change without authority confirmation.
    pub async fn cancel<S: DocumentStore>(
        &mut self,
        store: &mut S,
        tenant_id: u64,
        document_id: u64,
        justification: &str,
    ) -> Result<CancelOutcome, Error> {
        let mut document = store.load_document(tenant_id, document_id)?;

        let Some(reference) = document.gateway_ref.clone() else {
            return Err(Error::StateConflict(
                "document has no gateway reference; cancellation requires an authorized document"
                    .into(),
            ));
        };
        if document.status != DocumentStatus::Authorized {
            return Err(Error::StateConflict(format!(
                "document is {}, cancellation requires authorized",
                document.status
            )));
        }

        // Checked before the gateway call; the client re-checks, but a
        // guaranteed-to-fail request should not cost an authority call.
        validate_justification(justification)?;

        match self.gateway.cancel_document(&reference, justification).await {
            Ok(receipt) if receipt.status == GatewayStatus::Cancelled => {
                document.status = DocumentStatus::Cancelled;
                document.cancelled_at = Some(Utc::now());
                document.cancel_justification = Some(justification.to_string());
                document.authority_message = receipt.authority_message.clone();
                store.save_document(&document)?;
                store.append_event(FiscalEvent::now(
                    document_id,
                    tenant_id,
                    FiscalEventKind::Cancelled,
                    receipt.raw_body,
                ))?;
                Ok(CancelOutcome {
                    status: document.status,
                })
            }
            Ok(receipt) => {
                // The gateway answered but did not confirm cancellation.
                let message = receipt
                    .authority_message
                    .clone()
                    .unwrap_or_else(|| "cancellation refused by authority".into());
                store.append_event(FiscalEvent::now(
                    document_id,
                    tenant_id,
                    FiscalEventKind::CancelError,
                    receipt.raw_body,
                ))?;
                Err(Error::GatewayRejection(message))
            }
            Err(err) => {
                store.append_event(FiscalEvent::now(
                    document_id,
                    tenant_id,
                    FiscalEventKind::CancelError,
                    err.message(),
                ))?;
                Err(err)
            }
        }
    }
}
