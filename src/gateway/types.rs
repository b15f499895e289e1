//! Gateway response shapes and the external → internal status mapping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{DocumentStatus, Error};

/// How many characters of a response body are kept for the event log.
pub const RAW_BODY_LIMIT: usize = 2000;

/// Authorization status vocabulary used by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayStatus {
    /// Queued or still processing at SEFAZ — not an error.
    Pending,
    Authorized,
    /// Refused with a correctable validation message.
    Rejected,
    /// Denied by the authority (irregular taxpayer situation).
    Denied,
    Cancelled,
}

impl GatewayStatus {
    /// Parse the gateway's status strings. Unknown vocabulary maps to
    /// `Pending` so a new gateway status never breaks polling — the
    /// document stays re-pollable.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "autorizado" | "authorized" => Self::Authorized,
            "cancelado" | "cancelled" => Self::Cancelled,
            "denegado" | "denied" => Self::Denied,
            "erro_autorizacao" | "rejeitado" | "rejected" => Self::Rejected,
            _ => Self::Pending,
        }
    }

    /// Map to the internal lifecycle vocabulary.
    pub fn to_document_status(self) -> DocumentStatus {
        match self {
            Self::Pending => DocumentStatus::Submitted,
            Self::Authorized => DocumentStatus::Authorized,
            Self::Rejected | Self::Denied => DocumentStatus::Rejected,
            Self::Cancelled => DocumentStatus::Cancelled,
        }
    }
}

/// Links to the rendered document artifacts, once authorized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentUrls {
    pub danfe: Option<String>,
    pub xml: Option<String>,
}

/// Outcome of a submission, poll, or cancellation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayReceipt {
    pub status: GatewayStatus,
    /// Authority message, verbatim (mensagem_sefaz / erro).
    pub authority_message: Option<String>,
    pub access_key: Option<String>,
    pub protocol: Option<String>,
    pub number: Option<u64>,
    pub series: Option<u32>,
    pub document_urls: DocumentUrls,
    /// Response body as received, truncated to [`RAW_BODY_LIMIT`] — stored
    /// in the event log.
    pub raw_body: String,
}

/// Result of company registration / update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyRegistration {
    pub company_ref: String,
    pub certificate_expiry: Option<DateTime<Utc>>,
}

/// Wire form of a document response.
#[derive(Debug, Deserialize)]
struct RawReceipt {
    status: Option<String>,
    #[serde(alias = "mensagem")]
    mensagem_sefaz: Option<String>,
    #[serde(alias = "erro")]
    erros: Option<String>,
    chave_nfe: Option<String>,
    protocolo: Option<String>,
    numero: Option<serde_json::Value>,
    serie: Option<serde_json::Value>,
    caminho_danfe: Option<String>,
    caminho_xml_nota_fiscal: Option<String>,
}

/// Wire form of a company response.
#[derive(Debug, Deserialize)]
struct RawCompany {
    id: Option<serde_json::Value>,
    #[serde(alias = "validade_certificado")]
    certificado_valido_ate: Option<DateTime<Utc>>,
}

/// Truncate a response body for storage.
pub fn truncate_body(body: &str) -> String {
    body.chars().take(RAW_BODY_LIMIT).collect()
}

impl GatewayReceipt {
    /// Parse a document response body. Accepts the "not yet processed"
    /// shape (no status field) as a normal `Pending` receipt.
    pub fn from_json(body: &str) -> Result<Self, Error> {
        let raw: RawReceipt = serde_json::from_str(body)
            .map_err(|e| Error::Transport(format!("malformed gateway response: {e}")))?;

        let status = raw
            .status
            .as_deref()
            .map(GatewayStatus::parse)
            .unwrap_or(GatewayStatus::Pending);

        Ok(Self {
            status,
            authority_message: raw.mensagem_sefaz.or(raw.erros),
            access_key: raw.chave_nfe,
            protocol: raw.protocolo,
            number: raw.numero.as_ref().and_then(flexible_u64),
            series: raw
                .serie
                .as_ref()
                .and_then(flexible_u64)
                .and_then(|n| u32::try_from(n).ok()),
            document_urls: DocumentUrls {
                danfe: raw.caminho_danfe,
                xml: raw.caminho_xml_nota_fiscal,
            },
            raw_body: truncate_body(body),
        })
    }
}

impl CompanyRegistration {
    /// Parse a company registration/update response body.
    pub fn from_json(body: &str) -> Result<Self, Error> {
        let raw: RawCompany = serde_json::from_str(body)
            .map_err(|e| Error::Transport(format!("malformed company response: {e}")))?;

        let company_ref = raw
            .id
            .as_ref()
            .and_then(flexible_string)
            .ok_or_else(|| Error::Transport("company response missing id".into()))?;

        Ok(Self {
            company_ref,
            certificate_expiry: raw.certificado_valido_ate,
        })
    }
}

// The gateway is loose about numeric fields: "numero" arrives as either
// a JSON number or a string depending on the endpoint.
fn flexible_u64(value: &serde_json::Value) -> Option<u64> {
    match value {
        serde_json::Value::Number(n) => n.as_u64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn flexible_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_vocabulary_maps_to_lifecycle() {
        assert_eq!(GatewayStatus::parse("autorizado"), GatewayStatus::Authorized);
        assert_eq!(GatewayStatus::parse("processando_autorizacao"), GatewayStatus::Pending);
        assert_eq!(GatewayStatus::parse("erro_autorizacao"), GatewayStatus::Rejected);
        assert_eq!(GatewayStatus::parse("denegado"), GatewayStatus::Denied);
        assert_eq!(GatewayStatus::parse("CANCELADO"), GatewayStatus::Cancelled);

        assert_eq!(
            GatewayStatus::Pending.to_document_status(),
            crate::core::DocumentStatus::Submitted
        );
        assert_eq!(
            GatewayStatus::Denied.to_document_status(),
            crate::core::DocumentStatus::Rejected
        );
    }

    #[test]
    fn authorized_receipt_parses() {
        let body = r#"{
            "status": "autorizado",
            "mensagem_sefaz": "Autorizado o uso da NF-e",
            "chave_nfe": "NFe35240112345678000195550010000001231000000017",
            "protocolo": "135240000000001",
            "numero": "123",
            "serie": "1",
            "caminho_danfe": "/notas/123.pdf",
            "caminho_xml_nota_fiscal": "/notas/123.xml"
        }"#;
        let receipt = GatewayReceipt::from_json(body).unwrap();
        assert_eq!(receipt.status, GatewayStatus::Authorized);
        assert_eq!(receipt.number, Some(123));
        assert_eq!(receipt.series, Some(1));
        assert!(receipt.access_key.unwrap().starts_with("NFe"));
        assert_eq!(receipt.document_urls.danfe.as_deref(), Some("/notas/123.pdf"));
    }

    #[test]
    fn not_yet_processed_is_pending_not_error() {
        let receipt = GatewayReceipt::from_json(r#"{"status":"processando_autorizacao"}"#).unwrap();
        assert_eq!(receipt.status, GatewayStatus::Pending);

        // Some poll responses carry no status at all while queued.
        let receipt = GatewayReceipt::from_json(r#"{}"#).unwrap();
        assert_eq!(receipt.status, GatewayStatus::Pending);
    }

    #[test]
    fn numeric_fields_accept_numbers_and_strings() {
        let receipt = GatewayReceipt::from_json(r#"{"status":"autorizado","numero":123,"serie":1}"#).unwrap();
        assert_eq!(receipt.number, Some(123));
        let receipt = GatewayReceipt::from_json(r#"{"status":"autorizado","numero":"456"}"#).unwrap();
        assert_eq!(receipt.number, Some(456));
    }

    #[test]
    fn out_of_range_series_is_dropped_not_wrapped() {
        let receipt =
            GatewayReceipt::from_json(r#"{"status":"autorizado","serie":4294967296}"#).unwrap();
        assert_eq!(receipt.series, None);
    }

    #[test]
    fn malformed_body_is_transport_error() {
        let err = GatewayReceipt::from_json("<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }

    #[test]
    fn raw_body_is_truncated() {
        let huge = format!(r#"{{"status":"autorizado","mensagem_sefaz":"{}"}}"#, "x".repeat(5000));
        let receipt = GatewayReceipt::from_json(&huge).unwrap();
        assert_eq!(receipt.raw_body.chars().count(), RAW_BODY_LIMIT);
    }

    #[test]
    fn company_response_parses() {
        let reg = CompanyRegistration::from_json(r#"{"id": 987}"#).unwrap();
        assert_eq!(reg.company_ref, "987");
        assert!(reg.certificate_expiry.is_none());
    }
}
