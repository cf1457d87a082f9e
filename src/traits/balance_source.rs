use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;

use crate::models::token::TokenBalance;

/// Core trait for fetching ledger balances.
///
/// Implementations report failures as errors; whether a failure degrades
/// to a zero/empty value is the assembler's call, not the fetcher's.
#[async_trait]
pub trait BalanceSource: Send + Sync {
    /// Native balance in SOL (lamports scaled by the base unit)
    async fn fetch_native_balance(&self, wallet: &Pubkey) -> anyhow::Result<f64>;

    /// All fungible token holdings with a non-zero balance
    async fn fetch_token_balances(&self, wallet: &Pubkey) -> anyhow::Result<Vec<TokenBalance>>;
}
