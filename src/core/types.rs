use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::status::DocumentStatus;

/// An NF-e fiscal document — the central entity of the lifecycle engine.
///
/// Created in [`DocumentStatus::Draft`] by the collecting UI, then mutated
/// only by the engine (submit / reconcile / cancel). Once submitted it is
/// never physically deleted, only transitioned to `Cancelled`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiscalDocument {
    /// Owning tenant.
    pub tenant_id: u64,
    /// Internal identifier, unique per tenant.
    pub id: u64,
    /// Source order this document bills, if order-linked.
    pub order_id: Option<u64>,
    /// NF-e series (serie).
    pub series: u32,
    /// Sequence number within the series (nNF).
    pub number: u64,
    /// Operation nature free text (natOp), e.g. "VENDA DE MERCADORIA".
    pub operation_nature: String,
    /// CFOP operation code, e.g. "5102".
    pub operation_code: String,
    /// Document purpose (finNFe).
    pub purpose: DocumentPurpose,
    /// Destination party.
    pub destination: Destination,
    /// Payment method mapped to tPag at payload time.
    pub payment_method: PaymentMethod,
    /// Sum of line totals (vProd).
    pub products_total: Decimal,
    /// Freight charge (vFrete).
    pub freight: Decimal,
    /// Insurance charge (vSeg).
    pub insurance: Decimal,
    /// Other charges (vOutro).
    pub other_charges: Decimal,
    /// Document-level discount (vDesc).
    pub discount: Decimal,
    /// Grand total (vNF) — computed and stored at submission time,
    /// never re-derived from the authority response.
    pub grand_total: Decimal,
    /// Lifecycle status.
    pub status: DocumentStatus,
    /// Correlation reference registered with the gateway, once submitted.
    pub gateway_ref: Option<String>,
    /// Authority-issued access key (chave de acesso), once authorized.
    pub access_key: Option<String>,
    /// Authority protocol number, once authorized.
    pub protocol: Option<String>,
    /// Last authority / gateway message (rejection reason, status text).
    pub authority_message: Option<String>,
    /// Set once on the first transition into `Authorized`; never overwritten.
    pub authorized_at: Option<DateTime<Utc>>,
    /// Set when the document is cancelled.
    pub cancelled_at: Option<DateTime<Utc>>,
    /// Cancellation justification, kept for audit.
    pub cancel_justification: Option<String>,
}

impl FiscalDocument {
    /// Grand total per the NF-e totals rule:
    /// vNF = vProd + vFrete + vSeg + vOutro − vDesc.
    pub fn compute_grand_total(&self) -> Decimal {
        self.products_total + self.freight + self.insurance + self.other_charges - self.discount
    }
}

/// One line item of a fiscal document (det block).
///
/// Owned exclusively by its parent document; immutable once the parent
/// leaves `Draft`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiscalDocumentItem {
    /// Line sequence (nItem), 1-based.
    pub sequence: u32,
    /// Product code (cProd).
    pub product_code: String,
    /// Description (xProd).
    pub description: String,
    /// NCM tariff code — 8 digits.
    pub ncm: String,
    /// Origin code (orig), 0–8.
    pub origin: u8,
    /// CFOP for this line; falls back to the document's operation code.
    pub cfop: Option<String>,
    /// ICMS situation code — CSOSN under Simples, CST otherwise.
    pub icms_situation: String,
    /// PIS situation code (CST PIS).
    pub pis_situation: String,
    /// COFINS situation code (CST COFINS).
    pub cofins_situation: String,
    /// Commercial unit (uCom).
    pub unit: String,
    /// Quantity (qCom).
    pub quantity: Decimal,
    /// Unit price (vUnCom) — 4 decimal places on the wire.
    pub unit_price: Decimal,
    /// Line total (vProd) — 2 decimal places on the wire.
    pub line_total: Decimal,
    /// Line-level discount.
    pub discount: Option<Decimal>,
}

/// Destination party of a fiscal document (dest block).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Destination {
    /// Name (xNome).
    pub name: String,
    /// Individual (CPF) or business (CNPJ).
    pub kind: PartyKind,
    /// CPF or CNPJ, digits with or without punctuation.
    pub tax_id: Option<String>,
    /// State registration (IE) — presence drives the contributor indicator.
    pub state_registration: Option<String>,
    pub street: String,
    pub street_number: String,
    pub complement: Option<String>,
    pub district: String,
    pub city: String,
    /// IBGE city code, 7 digits.
    pub city_code: Option<String>,
    /// Two-letter state code (UF).
    pub state: String,
    /// Postal code (CEP), 8 digits.
    pub postal_code: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Whether the destination party is an individual or a business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartyKind {
    /// Natural person — identified by CPF.
    Individual,
    /// Legal entity — identified by CNPJ.
    Business,
}

/// finNFe — document purpose codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentPurpose {
    /// 1 — Normal operation.
    Normal,
    /// 2 — Complementary document.
    Complementary,
    /// 3 — Adjustment document.
    Adjustment,
    /// 4 — Return of goods.
    Return,
}

/// Payment methods accepted by the collecting UI, mapped to tPag codes
/// at payload time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Cheque,
    CreditCard,
    DebitCard,
    StoreCredit,
    Boleto,
    BankTransfer,
    Pix,
    Other,
}

/// CRT — tax regime of the issuing merchant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxRegime {
    /// 1 — Simples Nacional.
    SimplesNacional,
    /// 2 — Simples Nacional above the gross-revenue sublimit.
    SimplesExcesso,
    /// 3 — Regime normal (lucro presumido / lucro real).
    Normal,
}

/// Tenant-scoped merchant registration data (emit block + gateway company).
///
/// `gateway_company_ref` is idempotency state for company sync: absence
/// triggers a create call, presence an update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerchantFiscalProfile {
    pub tenant_id: u64,
    /// Legal name (razão social, xNome).
    pub legal_name: String,
    /// Trade name (nome fantasia, xFant).
    pub trade_name: Option<String>,
    /// CNPJ, digits with or without punctuation.
    pub cnpj: String,
    /// State registration (IE).
    pub state_registration: Option<String>,
    /// Municipal registration (IM).
    pub municipal_registration: Option<String>,
    pub tax_regime: TaxRegime,
    pub street: String,
    pub street_number: String,
    pub complement: Option<String>,
    pub district: String,
    pub city: String,
    /// IBGE city code, 7 digits.
    pub city_code: Option<String>,
    /// Two-letter state code (UF).
    pub state: String,
    /// Postal code (CEP), 8 digits.
    pub postal_code: String,
    /// External registration id assigned by the gateway, once synchronized.
    pub gateway_company_ref: Option<String>,
    /// A1 signing certificate, base64 PKCS#12.
    pub certificate: Option<SigningCertificate>,
    /// Expiry reported by the gateway for the uploaded certificate.
    pub certificate_expiry: Option<DateTime<Utc>>,
}

/// A1 certificate material forwarded to the gateway on company sync.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SigningCertificate {
    /// PKCS#12 archive, base64-encoded.
    pub archive_base64: String,
    pub password: String,
}
