use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::AggregatorConfig;
use crate::traits::price_oracle::PriceOracle;

/// CoinGecko-style simple price oracle: `{"solana": {"usd": <price>}}`
pub struct CoinGeckoOracle {
    client: Client,
    url: String,
}

impl CoinGeckoOracle {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl PriceOracle for CoinGeckoOracle {
    async fn fetch_native_price(&self) -> anyhow::Result<f64> {
        let body: serde_json::Value = self
            .client
            .get(&self.url)
            .send()
            .await
            .context("price request failed")?
            .error_for_status()
            .context("price endpoint returned an error status")?
            .json()
            .await
            .context("price response is not JSON")?;

        body.get("solana")
            .and_then(|v| v.get("usd"))
            .and_then(|v| v.as_f64())
            .ok_or_else(|| anyhow!("price field missing from response"))
    }

    fn source_name(&self) -> &str {
        "coingecko"
    }
}

/// Jupiter-style price oracle: `{"data": {"SOL": {"price": <price>}}}`
pub struct JupiterPriceOracle {
    client: Client,
    url: String,
}

impl JupiterPriceOracle {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl PriceOracle for JupiterPriceOracle {
    async fn fetch_native_price(&self) -> anyhow::Result<f64> {
        let body: serde_json::Value = self
            .client
            .get(&self.url)
            .send()
            .await
            .context("price request failed")?
            .error_for_status()
            .context("price endpoint returned an error status")?
            .json()
            .await
            .context("price response is not JSON")?;

        body.get("data")
            .and_then(|v| v.get("SOL"))
            .and_then(|v| v.get("price"))
            .and_then(|v| v.as_f64())
            .ok_or_else(|| anyhow!("price field missing from response"))
    }

    fn source_name(&self) -> &str {
        "jupiter"
    }
}

/// Ordered fallback chain over price oracles.
///
/// Each source gets one bounded attempt; an error, a missing field, or a
/// non-positive quote falls through to the next source. An exhausted chain
/// reports 0.0, meaning "price unknown" rather than a failure.
pub struct OracleChain {
    oracles: Vec<Arc<dyn PriceOracle>>,
    timeout: Duration,
}

impl OracleChain {
    pub fn new(oracles: Vec<Arc<dyn PriceOracle>>, timeout: Duration) -> Self {
        Self { oracles, timeout }
    }

    /// Primary/secondary chain over the configured endpoints
    pub fn from_config(config: &AggregatorConfig) -> Self {
        Self::new(
            vec![
                Arc::new(CoinGeckoOracle::new(config.price_api_url.clone())),
                Arc::new(JupiterPriceOracle::new(config.price_fallback_url.clone())),
            ],
            config.request_timeout,
        )
    }

    /// USD price of the native asset, 0.0 when every source is exhausted
    pub async fn fetch_native_price(&self) -> f64 {
        for oracle in &self.oracles {
            match tokio::time::timeout(self.timeout, oracle.fetch_native_price()).await {
                Ok(Ok(price)) if price > 0.0 => {
                    debug!("Native price from {}: ${}", oracle.source_name(), price);
                    return price;
                }
                Ok(Ok(price)) => {
                    warn!(
                        "{} returned non-positive price {}, trying next source",
                        oracle.source_name(),
                        price
                    );
                }
                Ok(Err(e)) => {
                    warn!("{} price fetch failed: {:#}", oracle.source_name(), e);
                }
                Err(_) => {
                    warn!("{} price fetch timed out", oracle.source_name());
                }
            }
        }

        warn!("All price sources exhausted, native price unknown");
        0.0
    }
}
