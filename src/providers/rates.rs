use std::collections::HashMap;
use std::time::Duration;

use anyhow::{bail, Context};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::AggregatorConfig;
use crate::fx::RateTable;

/// Foreign-exchange rate table source
/// (`{"rates": {code: {"value": <magnitude>}}}` wire shape)
pub struct ExchangeRateSource {
    client: Client,
    url: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct RatesResponse {
    rates: HashMap<String, RateRecord>,
}

#[derive(Debug, Deserialize)]
struct RateRecord {
    value: f64,
}

impl ExchangeRateSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            timeout,
        }
    }

    pub fn from_config(config: &AggregatorConfig) -> Self {
        Self::new(config.exchange_rates_url.clone(), config.request_timeout)
    }

    /// Fetch the current rate table, keys lowercased
    pub async fn fetch_rates(&self) -> anyhow::Result<RateTable> {
        let response = self
            .client
            .get(&self.url)
            .timeout(self.timeout)
            .send()
            .await
            .context("exchange rate request failed")?;

        let status = response.status();
        if !status.is_success() {
            bail!("exchange rate endpoint returned status {}", status);
        }

        let body: RatesResponse = response
            .json()
            .await
            .context("exchange rate table is malformed")?;

        debug!("Loaded {} exchange rates", body.rates.len());
        Ok(body
            .rates
            .into_iter()
            .map(|(code, record)| (code.to_lowercase(), record.value))
            .collect())
    }
}
