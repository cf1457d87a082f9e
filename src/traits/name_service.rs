use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;

use crate::error::ResolveError;

/// Name-registry lookups in both directions.
///
/// Forward and reverse resolution are independent and may disagree or fail
/// independently of one another.
#[async_trait]
pub trait NameService: Send + Sync {
    /// Forward lookup: human-readable name to address
    async fn resolve_name(&self, name: &str) -> Result<Pubkey, ResolveError>;

    /// Reverse lookup: address to linked name. `Ok(None)` is the success
    /// path meaning "no linked name", distinct from a transport failure.
    async fn lookup_name(&self, wallet: &Pubkey) -> anyhow::Result<Option<String>>;
}
