use std::time::Duration;

use anyhow::{bail, Context};
use reqwest::Client;
use solana_sdk::pubkey::Pubkey;
use tracing::debug;

use crate::config::AggregatorConfig;
use crate::models::transaction::TransactionEntry;

/// Paginated transaction history fetcher.
///
/// Stateless per call: the caller owns the stack of prior cursors for
/// backward pagination. For a fixed `(address, limit, before)` triple the
/// call is idempotent at a given ledger height; the feed itself is live
/// and append-only.
pub struct TransactionHistory {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl TransactionHistory {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key,
            timeout,
        }
    }

    pub fn from_config(config: &AggregatorConfig) -> Self {
        Self::new(
            config.tx_api_url.clone(),
            config.tx_api_key.clone(),
            config.request_timeout,
        )
    }

    /// One page of recent activity, newest first. `before` is the
    /// signature of the previous page's last entry.
    pub async fn fetch_page(
        &self,
        wallet: &Pubkey,
        limit: usize,
        before: Option<&str>,
    ) -> anyhow::Result<Vec<TransactionEntry>> {
        let mut url = format!(
            "{}/v0/addresses/{}/transactions?limit={}",
            self.base_url, wallet, limit
        );
        if let Some(key) = &self.api_key {
            url.push_str(&format!("&api-key={}", key));
        }
        if let Some(cursor) = before {
            url.push_str(&format!("&before={}", cursor));
        }

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .context("transaction history request failed")?;

        let status = response.status();
        if !status.is_success() {
            bail!("transaction history returned status {}", status);
        }

        let entries: Vec<TransactionEntry> = response
            .json()
            .await
            .context("transaction history response is malformed")?;

        debug!("Fetched {} transactions for {}", entries.len(), wallet);
        Ok(entries)
    }
}

/// Cursor for the page following `page`, if the feed may continue
pub fn next_cursor(page: &[TransactionEntry]) -> Option<String> {
    page.last().map(|entry| entry.signature.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn wallet() -> Pubkey {
        Pubkey::from_str("5Q544fKrFoe6tsEbD7S8EmxGTJYAKtTVhAW5Q5pge4j1").unwrap()
    }

    fn tx_path() -> String {
        format!("/v0/addresses/{}/transactions", wallet())
    }

    fn page_json(signatures: &[&str]) -> serde_json::Value {
        json!(signatures
            .iter()
            .map(|sig| json!({"signature": sig, "type": "TRANSFER", "fee": 5000}))
            .collect::<Vec<_>>())
    }

    #[tokio::test]
    async fn fetches_a_page_with_api_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(tx_path()))
            .and(query_param("limit", "10"))
            .and(query_param("api-key", "secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_json(&["s1", "s2"])))
            .mount(&server)
            .await;

        let history =
            TransactionHistory::new(server.uri(), Some("secret".to_string()), Duration::from_secs(5));
        let page = history.fetch_page(&wallet(), 10, None).await.unwrap();

        assert_eq!(page.len(), 2);
        assert_eq!(page[0].signature, "s1");
        assert_eq!(next_cursor(&page).as_deref(), Some("s2"));
    }

    #[tokio::test]
    async fn consecutive_pages_are_disjoint() {
        let server = MockServer::start().await;
        // First page, no cursor
        Mock::given(method("GET"))
            .and(path(tx_path()))
            .and(query_param("limit", "3"))
            .and(query_param("before", "s3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_json(&["s4", "s5", "s6"])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(tx_path()))
            .and(query_param("limit", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_json(&["s1", "s2", "s3"])))
            .mount(&server)
            .await;

        let history = TransactionHistory::new(server.uri(), None, Duration::from_secs(5));

        let first = history.fetch_page(&wallet(), 3, None).await.unwrap();
        let cursor = next_cursor(&first).unwrap();
        let second = history.fetch_page(&wallet(), 3, Some(&cursor)).await.unwrap();

        let first_sigs: Vec<_> = first.iter().map(|t| t.signature.clone()).collect();
        for entry in &second {
            assert!(!first_sigs.contains(&entry.signature));
        }
    }

    #[tokio::test]
    async fn transport_failure_propagates_to_caller() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(tx_path()))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let history = TransactionHistory::new(server.uri(), None, Duration::from_secs(5));
        assert!(history.fetch_page(&wallet(), 10, None).await.is_err());
    }

    #[test]
    fn empty_page_has_no_cursor() {
        assert!(next_cursor(&[]).is_none());
    }
}
