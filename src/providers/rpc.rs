use std::sync::Arc;

use async_trait::async_trait;
use solana_account_decoder_client_types::token::UiTokenAccount;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_request::TokenAccountsFilter;
use solana_commitment_config::{CommitmentConfig, CommitmentLevel};
use solana_sdk::pubkey::Pubkey;
use tracing::info;

use crate::config::AggregatorConfig;
use crate::models::token::TokenBalance;
use crate::traits::balance_source::BalanceSource;
use crate::utils::helper::{lamports_to_sol, parse_pubkey};

/// Ledger RPC balance source
pub struct RpcBalanceSource {
    rpc_client: Arc<RpcClient>,
}

impl RpcBalanceSource {
    /// Create a new RPC balance source
    pub fn new(rpc_url: impl Into<String>) -> Self {
        let client = RpcClient::new_with_commitment(
            rpc_url.into(),
            CommitmentConfig {
                commitment: CommitmentLevel::Confirmed,
            },
        );

        Self {
            rpc_client: Arc::new(client),
        }
    }

    pub fn from_config(config: &AggregatorConfig) -> Self {
        Self::new(config.rpc_url.clone())
    }
}

#[async_trait]
impl BalanceSource for RpcBalanceSource {
    async fn fetch_native_balance(&self, wallet: &Pubkey) -> anyhow::Result<f64> {
        let lamports = self.rpc_client.get_balance(wallet).await?;
        Ok(lamports_to_sol(lamports))
    }

    async fn fetch_token_balances(&self, wallet: &Pubkey) -> anyhow::Result<Vec<TokenBalance>> {
        // Sweep accounts for both SPL Token and SPL Token-2022 programs
        let filters = [
            TokenAccountsFilter::ProgramId(spl_token::id()),
            TokenAccountsFilter::ProgramId(spl_token_2022::id()),
        ];

        let mut balances = Vec::new();

        for filter in filters {
            let accounts = self
                .rpc_client
                .get_token_accounts_by_owner(wallet, filter)
                .await?;

            for keyed_account in accounts {
                if let solana_account_decoder::UiAccountData::Json(parsed_account) =
                    keyed_account.account.data
                {
                    if let Some(info) = parsed_account.parsed.get("info") {
                        if let Ok(token_data) =
                            serde_json::from_value::<UiTokenAccount>(info.clone())
                        {
                            let token_amount = token_data.token_amount;
                            if let Ok(amount) = token_amount.amount.parse::<u64>() {
                                if amount > 0 {
                                    let mint = parse_pubkey(&token_data.mint)?;
                                    balances.push(TokenBalance::new(
                                        mint,
                                        amount,
                                        token_amount.decimals,
                                    ));
                                }
                            }
                        }
                    }
                }
            }
        }

        info!("Found {} tokens with non-zero balance", balances.len());
        Ok(balances)
    }
}
