//! Submission orchestration: preconditions, payload build, one gateway
//! attempt, one persisted transition, one audit event.

use crate::core::{
    DocumentStatus, Error, FiscalDocument, FiscalDocumentItem, FiscalEvent, FiscalEventKind,
    correlation_ref,
};
use crate::gateway::{FiscalGateway, GatewayStatus};
use crate::payload::{build_payload, round_amount};

use super::{AuthorizationHook, DocumentStore, FiscalEngine, SubmitOutcome, apply_authorization};

impl<G: FiscalGateway, H: AuthorizationHook> FiscalEngine<G, H> {
    /// Submit a draft (or corrected rejected) document for authorization.
    ///
    /// The correlation reference is derived deterministically from the
    /// document identity, so concurrent or repeated attempts collapse to
    /// one external filing.
    pub async fn submit<S: DocumentStore>(
        &mut self,
        store: &mut S,
        tenant_id: u64,
        document_id: u64,
    ) -> Result<SubmitOutcome, Error> {
        let profile = store.load_profile(tenant_id)?;
        let mut document = store.load_document(tenant_id, document_id)?;
        let items = store.load_items(tenant_id, document_id)?;

        if !document.status.is_submittable() {
            return Err(Error::StateConflict(format!(
                "document is {}, submission requires draft or rejected",
                document.status
            )));
        }
        check_preconditions(&profile.gateway_company_ref, &document, &items)?;

        // Totals are fixed now, from the lines the authority will see —
        // never re-derived from the authority response later.
        document.products_total = items.iter().map(line_total).sum();
        document.grand_total = document.compute_grand_total();

        let reference = correlation_ref(tenant_id, document_id);
        let payload = build_payload(&profile, &document, &items, profile.certificate.as_ref());

        let receipt = match self.gateway.submit_document(&reference, &payload).await {
            Ok(receipt) => receipt,
            Err(Error::Authentication(message)) => {
                // Credential problem: the filing never reached the
                // authority, so the document status is left untouched.
                store.append_event(FiscalEvent::now(
                    document_id,
                    tenant_id,
                    FiscalEventKind::SubmissionError,
                    message.as_str(),
                ))?;
                return Err(Error::Authentication(message));
            }
            Err(err) => {
                document.status = DocumentStatus::Rejected;
                document.authority_message = Some(err.message());
                store.save_document(&document)?;
                store.append_event(FiscalEvent::now(
                    document_id,
                    tenant_id,
                    FiscalEventKind::SubmissionError,
                    err.message(),
                ))?;
                return Err(err);
            }
        };

        document.gateway_ref = Some(reference);

        match receipt.status {
            GatewayStatus::Rejected | GatewayStatus::Denied => {
                let message = receipt
                    .authority_message
                    .clone()
                    .unwrap_or_else(|| "document refused by authority".into());
                document.status = DocumentStatus::Rejected;
                document.authority_message = Some(message.clone());
                store.save_document(&document)?;
                store.append_event(FiscalEvent::now(
                    document_id,
                    tenant_id,
                    FiscalEventKind::SubmissionError,
                    receipt.raw_body,
                ))?;
                Err(Error::GatewayRejection(message))
            }
            GatewayStatus::Authorized => {
                // Some authorities authorize synchronously.
                apply_authorization(&mut document, &receipt);
                store.save_document(&document)?;
                store.append_event(FiscalEvent::now(
                    document_id,
                    tenant_id,
                    FiscalEventKind::Authorized,
                    receipt.raw_body,
                ))?;
                self.hook.on_authorized(&document);
                Ok(outcome(&document))
            }
            GatewayStatus::Pending | GatewayStatus::Cancelled => {
                // A cancelled receipt on a fresh filing means the gateway
                // still holds a cancellation recorded under this reference.
                // `submitted` is the safe resting state either way: the
                // reconciler re-polls and applies whatever the authority
                // actually answers for this filing.
                document.status = DocumentStatus::Submitted;
                document.authority_message = receipt.authority_message.clone();
                store.save_document(&document)?;
                store.append_event(FiscalEvent::now(
                    document_id,
                    tenant_id,
                    FiscalEventKind::Submitted,
                    receipt.raw_body,
                ))?;
                Ok(outcome(&document))
            }
        }
    }
}

fn line_total(item: &FiscalDocumentItem) -> rust_decimal::Decimal {
    let gross = if item.line_total.is_zero() {
        item.quantity * item.unit_price
    } else {
        item.line_total
    };
    round_amount(gross)
}

fn check_preconditions(
    company_ref: &Option<String>,
    document: &FiscalDocument,
    items: &[FiscalDocumentItem],
) -> Result<(), Error> {
    if items.is_empty() {
        return Err(Error::Validation(
            "document has no items; at least one is required".into(),
        ));
    }
    if company_ref.is_none() {
        return Err(Error::Validation(
            "merchant is not registered with the gateway; run company sync first".into(),
        ));
    }

    let dest = &document.destination;
    let required = [
        ("destination name", &dest.name),
        ("destination street", &dest.street),
        ("destination street number", &dest.street_number),
        ("destination district", &dest.district),
        ("destination city", &dest.city),
        ("destination state", &dest.state),
        ("destination postal code", &dest.postal_code),
    ];
    for (label, value) in required {
        if value.trim().is_empty() {
            return Err(Error::Validation(format!("{label} must not be empty")));
        }
    }
    Ok(())
}

fn outcome(document: &FiscalDocument) -> SubmitOutcome {
    SubmitOutcome {
        status: document.status,
        authority_message: document.authority_message.clone(),
        access_key: document.access_key.clone(),
    }
}
