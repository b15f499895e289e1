//! HTTP transport to the third-party NF-e gateway.
//!
//! Stateless: every call builds its request from the injected
//! [`GatewayConfig`], performs one blocking-to-completion HTTP exchange,
//! and shapes the response. No business logic, no retries.

use serde::Serialize;

use crate::core::{Error, MerchantFiscalProfile};
use crate::payload::DocumentPayload;

use super::config::GatewayConfig;
use super::types::{CompanyRegistration, GatewayReceipt, truncate_body};
use super::{FiscalGateway, JUSTIFICATION_MAX, JUSTIFICATION_MIN};

/// Production client for the gateway HTTP API.
pub struct HttpGateway {
    config: GatewayConfig,
    http: reqwest::Client,
}

#[derive(Serialize)]
struct CancelBody<'a> {
    justificativa: &'a str,
}

#[derive(Serialize)]
struct CompanyBody<'a> {
    cnpj: String,
    razao_social: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    nome_fantasia: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inscricao_estadual: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inscricao_municipal: Option<String>,
    regime_tributario: u8,
    logradouro: &'a str,
    numero: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    complemento: Option<&'a str>,
    bairro: &'a str,
    municipio: &'a str,
    uf: &'a str,
    cep: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    arquivo_certificado_base64: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    senha_certificado: Option<&'a str>,
}

impl HttpGateway {
    /// Build a client with a 30 s request timeout.
    pub fn new(config: GatewayConfig) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Transport(e.to_string()))?;
        Ok(Self { config, http })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url())
    }

    /// Send a request with the gateway's auth scheme (token as Basic-auth
    /// username, empty secret) and read the body.
    ///
    /// Authentication failures may arrive as plain text, so they are
    /// detected from the HTTP status alone, before any JSON parsing.
    async fn exchange(&self, request: reqwest::RequestBuilder) -> Result<(u16, String), Error> {
        let response = request
            .basic_auth(&self.config.token, None::<&str>)
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        tracing::debug!(
            status = status.as_u16(),
            body = %truncate_body(&body),
            "gateway response"
        );

        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(Error::Authentication(truncate_body(&body)));
        }
        if status.is_server_error() {
            return Err(Error::Transport(format!("HTTP {status}: {}", truncate_body(&body))));
        }

        Ok((status.as_u16(), body))
    }

    fn company_body<'a>(profile: &'a MerchantFiscalProfile) -> CompanyBody<'a> {
        use crate::payload::codes::tax_regime_code;
        use crate::payload::sanitize::{digits_only, digits_truncated, limits};

        CompanyBody {
            cnpj: digits_truncated(&profile.cnpj, limits::CNPJ),
            razao_social: &profile.legal_name,
            nome_fantasia: profile.trade_name.as_deref(),
            inscricao_estadual: profile
                .state_registration
                .as_deref()
                .map(digits_only)
                .filter(|d| !d.is_empty()),
            inscricao_municipal: profile
                .municipal_registration
                .as_deref()
                .map(digits_only)
                .filter(|d| !d.is_empty()),
            regime_tributario: tax_regime_code(profile.tax_regime),
            logradouro: &profile.street,
            numero: &profile.street_number,
            complemento: profile.complement.as_deref(),
            bairro: &profile.district,
            municipio: &profile.city,
            uf: &profile.state,
            cep: digits_truncated(&profile.postal_code, limits::POSTAL_CODE),
            arquivo_certificado_base64: profile
                .certificate
                .as_ref()
                .map(|c| c.archive_base64.as_str()),
            senha_certificado: profile.certificate.as_ref().map(|c| c.password.as_str()),
        }
    }
}

impl FiscalGateway for HttpGateway {
    async fn register_company(
        &self,
        profile: &MerchantFiscalProfile,
        existing_ref: Option<&str>,
    ) -> Result<CompanyRegistration, Error> {
        let body = Self::company_body(profile);
        let request = match existing_ref {
            // Presence of a ref is the idempotency signal: update, not create.
            Some(company_ref) => self
                .http
                .put(self.url(&format!("/v2/empresas/{company_ref}")))
                .json(&body),
            None => self.http.post(self.url("/v2/empresas")).json(&body),
        };

        let (status, body) = self.exchange(request).await?;
        if !(200..300).contains(&status) {
            return Err(Error::Transport(format!(
                "company sync failed with HTTP {status}: {}",
                truncate_body(&body)
            )));
        }
        CompanyRegistration::from_json(&body)
    }

    async fn submit_document(
        &self,
        correlation_ref: &str,
        payload: &DocumentPayload,
    ) -> Result<GatewayReceipt, Error> {
        tracing::debug!(correlation_ref, "submitting fiscal document");
        let request = self
            .http
            .post(self.url("/v2/nfe"))
            .query(&[("ref", correlation_ref)])
            .json(payload);

        // 4xx bodies are structured rejections, parsed into a receipt so
        // the orchestrator can persist the authority's message.
        let (_, body) = self.exchange(request).await?;
        GatewayReceipt::from_json(&body)
    }

    async fn poll_status(&self, correlation_ref: &str) -> Result<GatewayReceipt, Error> {
        let request = self.http.get(self.url(&format!("/v2/nfe/{correlation_ref}")));
        let (_, body) = self.exchange(request).await?;
        GatewayReceipt::from_json(&body)
    }

    async fn cancel_document(
        &self,
        correlation_ref: &str,
        justification: &str,
    ) -> Result<GatewayReceipt, Error> {
        validate_justification(justification)?;

        let request = self
            .http
            .delete(self.url(&format!("/v2/nfe/{correlation_ref}")))
            .json(&CancelBody {
                justificativa: justification,
            });
        let (_, body) = self.exchange(request).await?;
        GatewayReceipt::from_json(&body)
    }
}

/// Reject an out-of-range justification before any network call — the
/// authority is guaranteed to refuse it anyway.
pub fn validate_justification(justification: &str) -> Result<(), Error> {
    let len = justification.chars().count();
    if !(JUSTIFICATION_MIN..=JUSTIFICATION_MAX).contains(&len) {
        return Err(Error::Validation(format!(
            "cancellation justification must be {JUSTIFICATION_MIN}–{JUSTIFICATION_MAX} characters, got {len}"
        )));
    }
    Ok(())
}
