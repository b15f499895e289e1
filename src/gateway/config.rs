use serde::{Deserialize, Serialize};

const PRODUCTION_URL: &str = "https://api.nfegateway.com.br";
const HOMOLOGATION_URL: &str = "https://homologacao.nfegateway.com.br";

/// Which SEFAZ environment the gateway should file against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// Test environment — documents carry no fiscal validity.
    Homologation,
    /// Live environment.
    Production,
}

/// Gateway connection settings, injected into the client constructor.
///
/// Business logic never reads credentials from the process environment;
/// the caller resolves configuration once per invocation and passes it
/// in, which keeps the client swappable for a fake in tests.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub environment: Environment,
    /// API token. Sent as the Basic-auth username with an empty secret.
    pub token: String,
    /// Override for the environment base URL (test servers).
    pub base_url: Option<String>,
}

impl GatewayConfig {
    pub fn new(environment: Environment, token: impl Into<String>) -> Self {
        Self {
            environment,
            token: token.into(),
            base_url: None,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Effective base URL for requests.
    pub fn base_url(&self) -> &str {
        match (&self.base_url, self.environment) {
            (Some(url), _) => url,
            (None, Environment::Production) => PRODUCTION_URL,
            (None, Environment::Homologation) => HOMOLOGATION_URL,
        }
    }
}
