use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use crate::utils::helper::fallback_symbol;

/// Raw token holding as reported by the ledger RPC
#[derive(Debug, Clone, PartialEq)]
pub struct TokenBalance {
    pub mint: Pubkey,
    pub amount: u64,
    pub decimals: u8,
    pub ui_amount: f64,
}

impl TokenBalance {
    /// Create a new token balance, deriving the human-scale amount
    pub fn new(mint: Pubkey, amount: u64, decimals: u8) -> Self {
        let ui_amount = amount as f64 / 10f64.powi(decimals as i32);

        Self {
            mint,
            amount,
            decimals,
            ui_amount,
        }
    }
}

/// Catalog record for a known token
#[derive(Debug, Clone)]
pub struct TokenMetadata {
    pub mint: Pubkey,
    pub symbol: String,
    pub name: String,
    pub logo_uri: Option<String>,
    /// Indicative USD price; absent for unpriced listings
    pub price: Option<f64>,
}

/// Token balance enriched with catalog metadata and USD valuation.
///
/// This is the unit the valuation and display layers consume. An unpriced
/// or unlisted mint keeps `price` and `value` at zero rather than failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedTokenBalance {
    pub mint: String,
    pub amount: u64,
    pub decimals: u8,
    pub ui_amount: f64,
    pub symbol: String,
    pub name: Option<String>,
    pub logo_uri: Option<String>,
    pub price: f64,
    pub value: f64,
}

impl EnrichedTokenBalance {
    /// Merge a raw balance with its catalog entry, if any.
    /// An unknown mint gets a truncated-mint symbol and a zero price.
    pub fn from_parts(balance: &TokenBalance, metadata: Option<&TokenMetadata>) -> Self {
        let mint = balance.mint.to_string();
        let symbol = metadata
            .map(|m| m.symbol.clone())
            .unwrap_or_else(|| fallback_symbol(&mint));
        let price = metadata.and_then(|m| m.price).unwrap_or(0.0);

        Self {
            symbol,
            name: metadata.map(|m| m.name.clone()),
            logo_uri: metadata.and_then(|m| m.logo_uri.clone()),
            price,
            value: balance.ui_amount * price,
            mint,
            amount: balance.amount,
            decimals: balance.decimals,
            ui_amount: balance.ui_amount,
        }
    }

    /// Format token amount with symbol
    pub fn formatted_amount(&self) -> String {
        format!("{:.8} {}", self.ui_amount, self.symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn mint() -> Pubkey {
        Pubkey::from_str("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v").unwrap()
    }

    #[test]
    fn ui_amount_is_decimal_shifted() {
        let balance = TokenBalance::new(mint(), 100_000_000, 6);
        assert!((balance.ui_amount - 100.0).abs() < 1e-9);

        let balance = TokenBalance::new(mint(), 1, 9);
        assert!((balance.ui_amount - 1e-9).abs() < 1e-18);
    }

    #[test]
    fn enrichment_computes_value_from_catalog_price() {
        let balance = TokenBalance::new(mint(), 100_000_000, 6);
        let metadata = TokenMetadata {
            mint: mint(),
            symbol: "USDC".to_string(),
            name: "USD Coin".to_string(),
            logo_uri: None,
            price: Some(2.5),
        };

        let enriched = EnrichedTokenBalance::from_parts(&balance, Some(&metadata));
        assert_eq!(enriched.symbol, "USDC");
        assert!((enriched.ui_amount - 100.0).abs() < 1e-9);
        assert!((enriched.value - 250.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_mint_degrades_to_truncated_symbol_and_zero_value() {
        let balance = TokenBalance::new(mint(), 42_000, 3);
        let enriched = EnrichedTokenBalance::from_parts(&balance, None);

        assert_eq!(enriched.symbol, "EPjF");
        assert_eq!(enriched.price, 0.0);
        assert_eq!(enriched.value, 0.0);
        assert!(enriched.name.is_none());
    }

    #[test]
    fn unpriced_listing_keeps_metadata_but_zero_value() {
        let balance = TokenBalance::new(mint(), 42_000, 3);
        let metadata = TokenMetadata {
            mint: mint(),
            symbol: "NEW".to_string(),
            name: "New Token".to_string(),
            logo_uri: Some("https://example.com/new.png".to_string()),
            price: None,
        };

        let enriched = EnrichedTokenBalance::from_parts(&balance, Some(&metadata));
        assert_eq!(enriched.symbol, "NEW");
        assert_eq!(enriched.value, 0.0);
    }
}
