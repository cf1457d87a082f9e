use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Deserialize;
use solana_sdk::pubkey::Pubkey;
use tracing::debug;

use crate::config::AggregatorConfig;
use crate::error::ResolveError;
use crate::traits::name_service::NameService;

/// Name-registry lookups through a thin REST gateway.
///
/// Forward: `GET {base}/resolve?name={name}` -> `{"address": ...}` or
/// `{"error": ...}`. Reverse: `GET {base}/domain?address={addr}` ->
/// `{"success": bool, "data": [{"name": ...}]}`.
pub struct HttpNameService {
    client: Client,
    base_url: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct ForwardResponse {
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    success: bool,
    #[serde(default)]
    data: Vec<ReverseRecord>,
}

#[derive(Debug, Deserialize)]
struct ReverseRecord {
    name: String,
}

impl HttpNameService {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            timeout,
        }
    }

    pub fn from_config(config: &AggregatorConfig) -> Self {
        Self::new(config.name_service_url.clone(), config.request_timeout)
    }
}

#[async_trait]
impl NameService for HttpNameService {
    async fn resolve_name(&self, name: &str) -> Result<Pubkey, ResolveError> {
        let url = format!("{}/resolve?name={}", self.base_url, name);

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ResolveError::NameServiceUnavailable(e.into()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::NameServiceUnavailable(anyhow!(
                "name service returned status {}",
                status
            )));
        }

        let body: ForwardResponse = response
            .json()
            .await
            .map_err(|e| ResolveError::NameServiceUnavailable(e.into()))?;

        if let Some(error) = body.error {
            debug!("No registry record for {}: {}", name, error);
            return Err(ResolveError::NameNotFound(name.to_string()));
        }

        let address = body
            .address
            .ok_or_else(|| ResolveError::NameNotFound(name.to_string()))?;

        address.parse::<Pubkey>().map_err(|_| {
            ResolveError::NameServiceUnavailable(anyhow!(
                "registry returned malformed address {} for {}",
                address,
                name
            ))
        })
    }

    async fn lookup_name(&self, wallet: &Pubkey) -> anyhow::Result<Option<String>> {
        let url = format!("{}/domain?address={}", self.base_url, wallet);

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .context("reverse name lookup request failed")?;

        let status = response.status();
        if !status.is_success() {
            bail!("reverse name lookup returned status {}", status);
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        if !content_type.contains("application/json") {
            bail!("reverse name lookup returned non-JSON content: {}", content_type);
        }

        let body: ReverseResponse = response
            .json()
            .await
            .context("reverse name lookup response is malformed")?;

        if !body.success {
            return Ok(None);
        }

        Ok(body.data.into_iter().next().map(|record| record.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service_for(server: &MockServer) -> HttpNameService {
        HttpNameService::new(server.uri(), Duration::from_secs(5))
    }

    fn wallet() -> Pubkey {
        Pubkey::from_str("5Q544fKrFoe6tsEbD7S8EmxGTJYAKtTVhAW5Q5pge4j1").unwrap()
    }

    #[tokio::test]
    async fn forward_lookup_resolves_registered_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/resolve"))
            .and(query_param("name", "alice.sol"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "address": "5Q544fKrFoe6tsEbD7S8EmxGTJYAKtTVhAW5Q5pge4j1"
            })))
            .mount(&server)
            .await;

        let address = service_for(&server).resolve_name("alice.sol").await.unwrap();
        assert_eq!(address, wallet());
    }

    #[tokio::test]
    async fn forward_lookup_maps_registry_miss_to_name_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/resolve"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"error": "domain not found"})),
            )
            .mount(&server)
            .await;

        let err = service_for(&server)
            .resolve_name("missing.sol")
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::NameNotFound(name) if name == "missing.sol"));
    }

    #[tokio::test]
    async fn forward_lookup_maps_transport_failure_to_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/resolve"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = service_for(&server)
            .resolve_name("alice.sol")
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::NameServiceUnavailable(_)));
    }

    #[tokio::test]
    async fn reverse_lookup_returns_first_linked_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/domain"))
            .and(query_param("address", wallet().to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": [{"name": "alice.sol"}, {"name": "alt.sol"}]
            })))
            .mount(&server)
            .await;

        let name = service_for(&server).lookup_name(&wallet()).await.unwrap();
        assert_eq!(name.as_deref(), Some("alice.sol"));
    }

    #[tokio::test]
    async fn reverse_lookup_without_record_is_ok_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/domain"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": []})),
            )
            .mount(&server)
            .await;

        let name = service_for(&server).lookup_name(&wallet()).await.unwrap();
        assert!(name.is_none());
    }

    #[tokio::test]
    async fn reverse_lookup_unsuccessful_body_is_ok_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/domain"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"success": false, "data": []})),
            )
            .mount(&server)
            .await;

        let name = service_for(&server).lookup_name(&wallet()).await.unwrap();
        assert!(name.is_none());
    }

    #[tokio::test]
    async fn reverse_lookup_rejects_non_json_content() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/domain"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw("<html>rate limited</html>", "text/html"),
            )
            .mount(&server)
            .await;

        assert!(service_for(&server).lookup_name(&wallet()).await.is_err());
    }
}
