//! Internal enumeration → authority code mappings.
//!
//! Unknown or unmapped values never reject a document here: the safe
//! fallback code is used instead, matching the authority's own "99 —
//! outros" escape hatch.

use crate::core::{Destination, DocumentPurpose, PartyKind, PaymentMethod, TaxRegime};

/// CRT — tax regime code.
pub fn tax_regime_code(regime: TaxRegime) -> u8 {
    match regime {
        TaxRegime::SimplesNacional => 1,
        TaxRegime::SimplesExcesso => 2,
        TaxRegime::Normal => 3,
    }
}

/// tPag — two-digit payment method code.
pub fn payment_method_code(method: PaymentMethod) -> &'static str {
    match method {
        PaymentMethod::Cash => "01",
        PaymentMethod::Cheque => "02",
        PaymentMethod::CreditCard => "03",
        PaymentMethod::DebitCard => "04",
        PaymentMethod::StoreCredit => "05",
        PaymentMethod::Boleto => "15",
        PaymentMethod::BankTransfer => "16",
        PaymentMethod::Pix => "17",
        PaymentMethod::Other => "99",
    }
}

/// finNFe — document purpose code.
pub fn purpose_code(purpose: DocumentPurpose) -> u8 {
    match purpose {
        DocumentPurpose::Normal => 1,
        DocumentPurpose::Complementary => 2,
        DocumentPurpose::Adjustment => 3,
        DocumentPurpose::Return => 4,
    }
}

/// indIEDest — ICMS contributor indicator of the destination.
///
/// Business with a state registration ⇒ 1 (contributor); business
/// without ⇒ 2 (exempt); individual ⇒ 9 (non-contributor).
pub fn contributor_indicator(destination: &Destination) -> u8 {
    match destination.kind {
        PartyKind::Business => {
            let has_registration = destination
                .state_registration
                .as_deref()
                .is_some_and(|ie| ie.chars().any(|c| c.is_ascii_digit()));
            if has_registration { 1 } else { 2 }
        }
        PartyKind::Individual => 9,
    }
}
