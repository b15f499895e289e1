//! Pure transformation from internal entities to the authority payload.
//!
//! Infallible by design: optionals may be absent, over-length text is
//! truncated, unknown codes fall back — the orchestrator, not the
//! builder, enforces required-field preconditions.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::core::{
    FiscalDocument, FiscalDocumentItem, MerchantFiscalProfile, PartyKind, SigningCertificate,
};

use super::codes;
use super::sanitize::{self, limits};
use super::types::*;

/// Round a monetary amount to exactly 2 decimal places, half-up.
pub fn round_amount(value: Decimal) -> Decimal {
    rounded_to_scale(value, 2)
}

/// Round a per-unit price to exactly 4 decimal places, half-up.
pub fn round_unit_price(value: Decimal) -> Decimal {
    rounded_to_scale(value, 4)
}

/// Half-up rounding followed by a rescale, so the wire form always shows
/// the full precision ("5.3330", not "5.333").
fn rounded_to_scale(value: Decimal, scale: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(scale);
    rounded
}

/// Build the authorization request for one document.
///
/// All rounding happens here, at construction, so the authority-visible
/// total stays reproducible from the line items it receives.
pub fn build_payload(
    profile: &MerchantFiscalProfile,
    document: &FiscalDocument,
    items: &[FiscalDocumentItem],
    certificate: Option<&SigningCertificate>,
) -> DocumentPayload {
    let itens: Vec<PayloadItem> = items
        .iter()
        .map(|item| build_item(item, &document.operation_code))
        .collect();

    DocumentPayload {
        natureza_operacao: sanitize::normalize_text(
            &document.operation_nature,
            limits::OPERATION_NATURE,
        ),
        finalidade_emissao: codes::purpose_code(document.purpose),
        serie: document.series,
        numero: document.number,
        forma_pagamento: codes::payment_method_code(document.payment_method).to_string(),
        emitente: build_emitter(profile),
        destinatario: build_recipient(document),
        itens,
        valor_produtos: round_amount(document.products_total),
        valor_frete: round_amount(document.freight),
        valor_seguro: round_amount(document.insurance),
        valor_outras_despesas: round_amount(document.other_charges),
        valor_desconto: round_amount(document.discount),
        valor_total: round_amount(document.grand_total),
        certificado: certificate.map(|cert| CertificateMaterial {
            arquivo_base64: cert.archive_base64.clone(),
            senha: cert.password.clone(),
        }),
    }
}

fn build_emitter(profile: &MerchantFiscalProfile) -> Emitter {
    Emitter {
        cnpj: sanitize::digits_truncated(&profile.cnpj, limits::CNPJ),
        razao_social: sanitize::normalize_text(&profile.legal_name, limits::NAME),
        nome_fantasia: sanitize::normalize_opt(profile.trade_name.as_deref(), limits::NAME),
        inscricao_estadual: registration_digits(profile.state_registration.as_deref()),
        inscricao_municipal: registration_digits(profile.municipal_registration.as_deref()),
        regime_tributario: codes::tax_regime_code(profile.tax_regime),
        logradouro: sanitize::normalize_text(&profile.street, limits::ADDRESS),
        numero: sanitize::normalize_text(&profile.street_number, limits::ADDRESS),
        complemento: sanitize::normalize_opt(profile.complement.as_deref(), limits::COMPLEMENT),
        bairro: sanitize::normalize_text(&profile.district, limits::ADDRESS),
        municipio: sanitize::normalize_text(&profile.city, limits::ADDRESS),
        codigo_municipio: profile
            .city_code
            .as_deref()
            .map(|c| sanitize::digits_truncated(c, 7)),
        uf: sanitize::normalize_text(&profile.state, 2),
        cep: sanitize::digits_truncated(&profile.postal_code, limits::POSTAL_CODE),
    }
}

fn build_recipient(document: &FiscalDocument) -> Recipient {
    let dest = &document.destination;
    let tax_id = dest.tax_id.as_deref().map(sanitize::digits_only);
    let (cnpj, cpf) = match dest.kind {
        PartyKind::Business => (tax_id.filter(|d| !d.is_empty()), None),
        PartyKind::Individual => (None, tax_id.filter(|d| !d.is_empty())),
    };

    Recipient {
        nome: sanitize::normalize_text(&dest.name, limits::NAME),
        cnpj: cnpj.map(|d| truncated(d, limits::CNPJ)),
        cpf: cpf.map(|d| truncated(d, limits::CPF)),
        inscricao_estadual: registration_digits(dest.state_registration.as_deref()),
        indicador_ie: codes::contributor_indicator(dest),
        logradouro: sanitize::normalize_text(&dest.street, limits::ADDRESS),
        numero: sanitize::normalize_text(&dest.street_number, limits::ADDRESS),
        complemento: sanitize::normalize_opt(dest.complement.as_deref(), limits::COMPLEMENT),
        bairro: sanitize::normalize_text(&dest.district, limits::ADDRESS),
        municipio: sanitize::normalize_text(&dest.city, limits::ADDRESS),
        codigo_municipio: dest
            .city_code
            .as_deref()
            .map(|c| sanitize::digits_truncated(c, 7)),
        uf: sanitize::normalize_text(&dest.state, 2),
        cep: sanitize::digits_truncated(&dest.postal_code, limits::POSTAL_CODE),
        email: dest.email.as_deref().map(|e| e.trim().to_string()).filter(|e| !e.is_empty()),
        telefone: dest
            .phone
            .as_deref()
            .map(sanitize::digits_only)
            .filter(|p| !p.is_empty()),
    }
}

fn build_item(item: &FiscalDocumentItem, document_cfop: &str) -> PayloadItem {
    let quantity = item.quantity;
    let unit_price = round_unit_price(item.unit_price);
    // Line total comes from the stored value when present, otherwise from
    // the raw (unrounded) quantity × price, then rounds exactly once.
    let gross = if item.line_total.is_zero() {
        item.quantity * item.unit_price
    } else {
        item.line_total
    };

    PayloadItem {
        numero_item: item.sequence,
        codigo_produto: sanitize::normalize_text(&item.product_code, limits::PRODUCT_CODE),
        descricao: sanitize::normalize_text(&item.description, limits::DESCRIPTION),
        codigo_ncm: sanitize::digits_truncated(&item.ncm, limits::NCM),
        cfop: sanitize::digits_truncated(item.cfop.as_deref().unwrap_or(document_cfop), 4),
        origem: item.origin,
        situacao_icms: item.icms_situation.trim().to_string(),
        situacao_pis: item.pis_situation.trim().to_string(),
        situacao_cofins: item.cofins_situation.trim().to_string(),
        unidade: sanitize::normalize_text(&item.unit, limits::UNIT),
        quantidade: quantity,
        valor_unitario: unit_price,
        valor_bruto: round_amount(gross),
        valor_desconto: item.discount.map(round_amount).filter(|d| !d.is_zero()),
    }
}

fn registration_digits(value: Option<&str>) -> Option<String> {
    let digits = sanitize::digits_truncated(value?, limits::STATE_REGISTRATION);
    if digits.is_empty() { None } else { Some(digits) }
}

fn truncated(mut s: String, max: usize) -> String {
    s.truncate(max);
    s
}
