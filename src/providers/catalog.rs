use std::collections::HashMap;
use std::time::Duration;

use anyhow::{bail, Context};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use solana_sdk::pubkey::Pubkey;
use tracing::{debug, info};

use crate::config::AggregatorConfig;
use crate::models::token::TokenMetadata;
use crate::traits::token_catalog::TokenCatalog;

/// Bulk token-list catalog (Jupiter-style JSON array)
pub struct JupiterCatalog {
    client: Client,
    url: String,
    timeout: Duration,
}

/// Wire record of the upstream token list
#[derive(Debug, Deserialize)]
struct CatalogRecord {
    address: String,
    symbol: String,
    name: String,
    #[serde(rename = "logoURI")]
    logo_uri: Option<String>,
    #[serde(default)]
    price: Option<f64>,
}

impl JupiterCatalog {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            timeout,
        }
    }

    pub fn from_config(config: &AggregatorConfig) -> Self {
        Self::new(config.token_catalog_url.clone(), config.request_timeout)
    }
}

#[async_trait]
impl TokenCatalog for JupiterCatalog {
    async fn fetch_catalog(&self) -> anyhow::Result<HashMap<Pubkey, TokenMetadata>> {
        let response = self
            .client
            .get(&self.url)
            .timeout(self.timeout)
            .send()
            .await
            .context("token catalog request failed")?;

        let status = response.status();
        if !status.is_success() {
            bail!("token catalog returned status {}", status);
        }

        // Anything that is not a JSON array (an HTML error page, an object)
        // is a hard failure, never an empty catalog.
        let records: Vec<CatalogRecord> = response
            .json()
            .await
            .context("token catalog is not a well-formed token list")?;

        let mut catalog = HashMap::with_capacity(records.len());
        for record in records {
            match record.address.parse::<Pubkey>() {
                Ok(mint) => {
                    catalog.insert(
                        mint,
                        TokenMetadata {
                            mint,
                            symbol: record.symbol,
                            name: record.name,
                            logo_uri: record.logo_uri,
                            price: record.price,
                        },
                    );
                }
                Err(_) => debug!("Skipping catalog entry with invalid mint: {}", record.address),
            }
        }

        info!("Loaded {} catalog entries", catalog.len());
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn catalog_for(server: &MockServer) -> JupiterCatalog {
        JupiterCatalog::new(format!("{}/all", server.uri()), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn parses_token_list_into_keyed_map() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/all"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "address": "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
                    "symbol": "USDC",
                    "name": "USD Coin",
                    "logoURI": "https://example.com/usdc.png",
                    "price": 1.0
                },
                {
                    "address": "So11111111111111111111111111111111111111112",
                    "symbol": "SOL",
                    "name": "Wrapped SOL"
                }
            ])))
            .mount(&server)
            .await;

        let catalog = catalog_for(&server).fetch_catalog().await.unwrap();
        assert_eq!(catalog.len(), 2);

        let usdc = &catalog[&"EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v"
            .parse::<Pubkey>()
            .unwrap()];
        assert_eq!(usdc.symbol, "USDC");
        assert_eq!(usdc.price, Some(1.0));

        let sol = &catalog[&"So11111111111111111111111111111111111111112"
            .parse::<Pubkey>()
            .unwrap()];
        assert!(sol.price.is_none());
    }

    #[tokio::test]
    async fn html_error_page_is_a_hard_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/all"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("<html><body>maintenance</body></html>", "text/html"),
            )
            .mount(&server)
            .await;

        assert!(catalog_for(&server).fetch_catalog().await.is_err());
    }

    #[tokio::test]
    async fn non_array_json_is_a_hard_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/all"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tokens": []})))
            .mount(&server)
            .await;

        assert!(catalog_for(&server).fetch_catalog().await.is_err());
    }

    #[tokio::test]
    async fn error_status_is_a_hard_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/all"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        assert!(catalog_for(&server).fetch_catalog().await.is_err());
    }

    #[tokio::test]
    async fn entries_with_invalid_mints_are_skipped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/all"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"address": "not-a-mint", "symbol": "BAD", "name": "Bad"},
                {
                    "address": "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
                    "symbol": "USDC",
                    "name": "USD Coin",
                    "price": 1.0
                }
            ])))
            .mount(&server)
            .await;

        let catalog = catalog_for(&server).fetch_catalog().await.unwrap();
        assert_eq!(catalog.len(), 1);
    }
}
