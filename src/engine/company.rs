//! Company synchronization with the gateway.

use crate::core::Error;
use crate::gateway::FiscalGateway;

use super::{AuthorizationHook, CompanySyncOutcome, DocumentStore, FiscalEngine};

impl<G: FiscalGateway, H: AuthorizationHook> FiscalEngine<G, H> {
    /// Register or update the tenant's company at the gateway.
    ///
    /// `gateway_company_ref` is the idempotency state: absent ⇒ create,
    /// present ⇒ update. The returned reference is persisted so the next
    /// sync — and every submission precondition check — sees it.
    pub async fn sync_company<S: DocumentStore>(
        &mut self,
        store: &mut S,
        tenant_id: u64,
    ) -> Result<CompanySyncOutcome, Error> {
        let mut profile = store.load_profile(tenant_id)?;

        let registration = self
            .gateway
            .register_company(&profile, profile.gateway_company_ref.as_deref())
            .await?;

        profile.gateway_company_ref = Some(registration.company_ref.clone());
        profile.certificate_expiry = registration.certificate_expiry;
        store.save_profile(&profile)?;

        Ok(CompanySyncOutcome {
            company_ref: registration.company_ref,
            certificate_expiry: registration.certificate_expiry,
        })
    }
}
