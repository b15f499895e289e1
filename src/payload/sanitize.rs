//! Field normalization for authority-facing text.
//!
//! The authority rejects over-length or mis-formatted fields outright, so
//! every free-text field is normalized here — silently and
//! deterministically, never as an error.

/// Maximum field lengths from the NF-e 4.00 layout.
pub mod limits {
    /// xNome — party name.
    pub const NAME: usize = 60;
    /// xLgr / xBairro / xMun — street, district, city.
    pub const ADDRESS: usize = 60;
    /// xCpl — address complement.
    pub const COMPLEMENT: usize = 60;
    /// natOp — operation nature.
    pub const OPERATION_NATURE: usize = 60;
    /// cProd — product code.
    pub const PRODUCT_CODE: usize = 60;
    /// xProd — item description.
    pub const DESCRIPTION: usize = 120;
    /// uCom — commercial unit.
    pub const UNIT: usize = 6;
    /// NCM tariff code.
    pub const NCM: usize = 8;
    /// CEP postal code.
    pub const POSTAL_CODE: usize = 8;
    /// CNPJ.
    pub const CNPJ: usize = 14;
    /// CPF.
    pub const CPF: usize = 11;
    /// IE state registration.
    pub const STATE_REGISTRATION: usize = 14;
}

/// Keep only ASCII digits. Used for every identifier the authority
/// expects unpunctuated (CNPJ, CPF, CEP, NCM, IE, phone).
pub fn digits_only(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Digits of an identifier, truncated to `max` digits.
pub fn digits_truncated(input: &str, max: usize) -> String {
    let mut digits = digits_only(input);
    digits.truncate(max);
    digits
}

/// Uppercase a human-readable field and truncate it to `max` characters.
///
/// Truncation counts characters, not bytes, so multi-byte letters common
/// in Portuguese names (Ã, Ç, É) never split mid-codepoint.
pub fn normalize_text(input: &str, max: usize) -> String {
    input.trim().to_uppercase().chars().take(max).collect()
}

/// Like [`normalize_text`] for optional fields; empty results collapse
/// to `None` so the serializer omits the field entirely.
pub fn normalize_opt(input: Option<&str>, max: usize) -> Option<String> {
    let normalized = normalize_text(input?, max);
    if normalized.is_empty() { None } else { Some(normalized) }
}
