use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::token::EnrichedTokenBalance;

/// One immutable, fully-assembled portfolio valuation.
///
/// Every assembly produces a fresh snapshot; nothing mutates a prior one.
/// `address` is the canonical address, except in the degraded terminal
/// state where it echoes the unresolvable input so the presentation layer
/// can render a "no data" view without a separate error branch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshot {
    pub timestamp: DateTime<Utc>,
    pub address: String,
    /// Human-readable name linked to the address, when one exists
    pub domain: Option<String>,
    pub sol_balance: f64,
    /// Enriched holdings, ordered by descending USD value
    pub tokens: Vec<EnrichedTokenBalance>,
    pub total_value: f64,
    pub is_loading: bool,
}

impl PortfolioSnapshot {
    /// Placeholder state for a presentation layer awaiting its first fetch
    pub fn loading(address: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            address: address.into(),
            domain: None,
            sol_balance: 0.0,
            tokens: Vec::new(),
            total_value: 0.0,
            is_loading: true,
        }
    }

    /// Terminal degraded state for a reference that could not be resolved
    pub fn unresolved(reference: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            address: reference.into(),
            domain: None,
            sol_balance: 0.0,
            tokens: Vec::new(),
            total_value: 0.0,
            is_loading: false,
        }
    }

    /// Check if snapshot is empty (no tokens)
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of tokens in portfolio
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }
}
