//! Persistence seam. The engine reads and writes through these traits;
//! the surrounding application owns the actual schema.

use std::collections::HashMap;

use crate::core::{Error, FiscalDocument, FiscalDocumentItem, FiscalEvent, MerchantFiscalProfile};

/// Tenant-scoped access to documents, items, profiles, and the event log.
///
/// `append_event` is append-only: implementations must never mutate or
/// delete previously written rows.
pub trait DocumentStore {
    fn load_document(&self, tenant_id: u64, document_id: u64) -> Result<FiscalDocument, Error>;
    fn load_items(&self, tenant_id: u64, document_id: u64)
    -> Result<Vec<FiscalDocumentItem>, Error>;
    fn save_document(&mut self, document: &FiscalDocument) -> Result<(), Error>;
    fn load_profile(&self, tenant_id: u64) -> Result<MerchantFiscalProfile, Error>;
    fn save_profile(&mut self, profile: &MerchantFiscalProfile) -> Result<(), Error>;
    fn append_event(&mut self, event: FiscalEvent) -> Result<(), Error>;
}

/// In-memory [`DocumentStore`] for tests and examples.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: HashMap<(u64, u64), FiscalDocument>,
    items: HashMap<(u64, u64), Vec<FiscalDocumentItem>>,
    profiles: HashMap<u64, MerchantFiscalProfile>,
    events: Vec<FiscalEvent>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_document(&mut self, document: FiscalDocument, items: Vec<FiscalDocumentItem>) {
        let key = (document.tenant_id, document.id);
        self.items.insert(key, items);
        self.documents.insert(key, document);
    }

    pub fn insert_profile(&mut self, profile: MerchantFiscalProfile) {
        self.profiles.insert(profile.tenant_id, profile);
    }

    /// All events recorded for a document, in append order.
    pub fn events_for(&self, document_id: u64) -> Vec<&FiscalEvent> {
        self.events
            .iter()
            .filter(|e| e.document_id == document_id)
            .collect()
    }
}

impl DocumentStore for MemoryStore {
    fn load_document(&self, tenant_id: u64, document_id: u64) -> Result<FiscalDocument, Error> {
        self.documents
            .get(&(tenant_id, document_id))
            .cloned()
            .ok_or_else(|| Error::Validation(format!("document {document_id} not found")))
    }

    fn load_items(
        &self,
        tenant_id: u64,
        document_id: u64,
    ) -> Result<Vec<FiscalDocumentItem>, Error> {
        Ok(self
            .items
            .get(&(tenant_id, document_id))
            .cloned()
            .unwrap_or_default())
    }

    fn save_document(&mut self, document: &FiscalDocument) -> Result<(), Error> {
        self.documents
            .insert((document.tenant_id, document.id), document.clone());
        Ok(())
    }

    fn load_profile(&self, tenant_id: u64) -> Result<MerchantFiscalProfile, Error> {
        self.profiles
            .get(&tenant_id)
            .cloned()
            .ok_or_else(|| Error::Validation(format!("no fiscal profile for tenant {tenant_id}")))
    }

    fn save_profile(&mut self, profile: &MerchantFiscalProfile) -> Result<(), Error> {
        self.profiles.insert(profile.tenant_id, profile.clone());
        Ok(())
    }

    fn append_event(&mut self, event: FiscalEvent) -> Result<(), Error> {
        self.events.push(event);
        Ok(())
    }
}
