//! Wire shape of the authority-compliant document request.
//!
//! Field names follow the gateway's Portuguese snake_case vocabulary;
//! monetary values serialize as fixed-point strings (rust_decimal's
//! `serde-with-str`), which is what the gateway expects.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Complete authorization request for one fiscal document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentPayload {
    pub natureza_operacao: String,
    /// finNFe.
    pub finalidade_emissao: u8,
    pub serie: u32,
    pub numero: u64,
    /// tPag, two digits.
    pub forma_pagamento: String,
    pub emitente: Emitter,
    pub destinatario: Recipient,
    pub itens: Vec<PayloadItem>,
    pub valor_produtos: Decimal,
    pub valor_frete: Decimal,
    pub valor_seguro: Decimal,
    pub valor_outras_despesas: Decimal,
    pub valor_desconto: Decimal,
    pub valor_total: Decimal,
    /// A1 certificate forwarded when the gateway signs on our behalf.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificado: Option<CertificateMaterial>,
}

/// emit block — the issuing merchant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Emitter {
    pub cnpj: String,
    pub razao_social: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome_fantasia: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inscricao_estadual: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inscricao_municipal: Option<String>,
    /// CRT.
    pub regime_tributario: u8,
    pub logradouro: String,
    pub numero: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complemento: Option<String>,
    pub bairro: String,
    pub municipio: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codigo_municipio: Option<String>,
    pub uf: String,
    pub cep: String,
}

/// dest block — the destination party.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipient {
    pub nome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cnpj: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpf: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inscricao_estadual: Option<String>,
    /// indIEDest.
    pub indicador_ie: u8,
    pub logradouro: String,
    pub numero: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complemento: Option<String>,
    pub bairro: String,
    pub municipio: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codigo_municipio: Option<String>,
    pub uf: String,
    pub cep: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,
}

/// det block — one line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadItem {
    pub numero_item: u32,
    pub codigo_produto: String,
    pub descricao: String,
    pub codigo_ncm: String,
    pub cfop: String,
    /// orig.
    pub origem: u8,
    pub situacao_icms: String,
    pub situacao_pis: String,
    pub situacao_cofins: String,
    pub unidade: String,
    pub quantidade: Decimal,
    /// 4 decimal places.
    pub valor_unitario: Decimal,
    /// 2 decimal places.
    pub valor_bruto: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valor_desconto: Option<Decimal>,
}

/// Certificate blob attached to the request when present on the profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificateMaterial {
    pub arquivo_base64: String,
    pub senha: String,
}
