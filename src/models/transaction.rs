use serde::{Deserialize, Serialize};

use crate::utils::helper::lamports_to_sol;

/// One entry of an address's transaction history, newest-first within a
/// page. The `signature` doubles as the pagination cursor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionEntry {
    pub signature: String,
    #[serde(rename = "type", default)]
    pub tx_type: String,
    /// Fee in lamports
    #[serde(default)]
    pub fee: u64,
    /// Unix timestamp in seconds, when the indexer knows it
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub events: TransactionEvents,
}

impl TransactionEntry {
    /// Fee expressed in SOL
    pub fn fee_sol(&self) -> f64 {
        lamports_to_sol(self.fee)
    }
}

/// Transfers decoded out of a transaction
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionEvents {
    #[serde(default)]
    pub native_transfers: Vec<NativeTransfer>,
    #[serde(default)]
    pub token_transfers: Vec<TokenTransfer>,
}

/// Movement of the native asset, amounts in lamports
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeTransfer {
    pub from_user_account: String,
    pub to_user_account: String,
    pub amount: u64,
}

impl NativeTransfer {
    pub fn amount_sol(&self) -> f64 {
        lamports_to_sol(self.amount)
    }
}

/// Movement of a fungible token
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenTransfer {
    pub from_user_account: String,
    pub to_user_account: String,
    pub token_amount: TokenTransferAmount,
}

/// Raw integer token amount with its display metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenTransferAmount {
    pub amount: String,
    pub decimals: u8,
    #[serde(default)]
    pub token_name: String,
    #[serde(default)]
    pub token_symbol: String,
}

impl TokenTransferAmount {
    /// Human-scale quantity; an unparseable raw amount reads as zero
    pub fn ui_amount(&self) -> f64 {
        let raw: f64 = self.amount.parse().unwrap_or(0.0);
        raw / 10f64.powi(self.decimals as i32)
    }
}
