use std::collections::HashMap;

use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;

use crate::models::token::TokenMetadata;

/// Bulk source of token metadata keyed by mint.
#[async_trait]
pub trait TokenCatalog: Send + Sync {
    /// Fetch the full mint -> metadata mapping.
    ///
    /// A malformed response is an error, never an empty catalog: an empty
    /// map would silently price every holding at zero downstream.
    async fn fetch_catalog(&self) -> anyhow::Result<HashMap<Pubkey, TokenMetadata>>;
}
