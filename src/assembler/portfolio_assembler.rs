use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use chrono::Utc;
use solana_sdk::pubkey::Pubkey;
use tokio::time::timeout;
use tracing::{info, warn};

use crate::config::AggregatorConfig;
use crate::error::AssembleError;
use crate::models::portfolio::PortfolioSnapshot;
use crate::models::token::EnrichedTokenBalance;
use crate::providers::catalog::JupiterCatalog;
use crate::providers::name::HttpNameService;
use crate::providers::price::OracleChain;
use crate::providers::rpc::RpcBalanceSource;
use crate::resolver::AddressResolver;
use crate::traits::balance_source::BalanceSource;
use crate::traits::name_service::NameService;
use crate::traits::token_catalog::TokenCatalog;

/// Orchestrates one portfolio assembly per call.
///
/// Stateless and re-entrant: every call resolves, fetches, and values from
/// scratch, so overlapping requests never share in-flight state. Failure
/// handling is two-tier and lives entirely in [`assemble`]: the catalog
/// fetch is the single sub-fetch allowed to abort the assembly, every other
/// failure degrades its own field and the snapshot still completes.
///
/// [`assemble`]: PortfolioAssembler::assemble
pub struct PortfolioAssembler {
    resolver: AddressResolver,
    balance_source: Arc<dyn BalanceSource>,
    catalog: Arc<dyn TokenCatalog>,
    price_chain: OracleChain,
    timeout: Duration,
}

impl PortfolioAssembler {
    pub fn new(
        balance_source: Arc<dyn BalanceSource>,
        catalog: Arc<dyn TokenCatalog>,
        name_service: Arc<dyn NameService>,
        price_chain: OracleChain,
        timeout: Duration,
    ) -> Self {
        Self {
            resolver: AddressResolver::new(name_service),
            balance_source,
            catalog,
            price_chain,
            timeout,
        }
    }

    /// Wire up the live providers behind the configured endpoints
    pub fn from_config(config: &AggregatorConfig) -> Self {
        Self::new(
            Arc::new(RpcBalanceSource::from_config(config)),
            Arc::new(JupiterCatalog::from_config(config)),
            Arc::new(HttpNameService::from_config(config)),
            OracleChain::from_config(config),
            config.request_timeout,
        )
    }

    /// Resolver shared with the search/landing flow
    pub fn resolver(&self) -> &AddressResolver {
        &self.resolver
    }

    /// Build one immutable valuation snapshot for an account reference.
    ///
    /// A reference that fails to resolve yields an `Ok` degraded terminal
    /// snapshot echoing the raw input, so the presentation layer renders a
    /// "no data" view without an error branch. The only `Err` is
    /// [`AssembleError::CatalogUnavailable`].
    pub async fn assemble(
        &self,
        reference: &str,
    ) -> Result<PortfolioSnapshot, AssembleError> {
        let wallet = match self.resolver.resolve(reference).await {
            Ok(wallet) => wallet,
            Err(e) => {
                warn!("Could not resolve {}: {}", reference, e);
                return Ok(PortfolioSnapshot::unresolved(reference));
            }
        };

        info!("Assembling portfolio for {}", wallet);

        // All five sub-fetches overlap; the join is bounded by the slowest
        // one, not their sum. The oracle chain bounds itself per source.
        let (native, raw_balances, catalog, domain, native_price) = tokio::join!(
            timeout(self.timeout, self.balance_source.fetch_native_balance(&wallet)),
            timeout(self.timeout, self.balance_source.fetch_token_balances(&wallet)),
            timeout(self.timeout, self.catalog.fetch_catalog()),
            timeout(self.timeout, self.resolver.resolve_linked_name(&wallet)),
            self.price_chain.fetch_native_price(),
        );

        let sol_balance = match native {
            Ok(Ok(balance)) => balance,
            Ok(Err(e)) => {
                warn!("Native balance fetch failed for {}: {:#}", wallet, e);
                0.0
            }
            Err(_) => {
                warn!("Native balance fetch timed out for {}", wallet);
                0.0
            }
        };

        let raw_balances = match raw_balances {
            Ok(Ok(balances)) => balances,
            Ok(Err(e)) => {
                warn!("Token balance fetch failed for {}: {:#}", wallet, e);
                Vec::new()
            }
            Err(_) => {
                warn!("Token balance fetch timed out for {}", wallet);
                Vec::new()
            }
        };

        let domain = match domain {
            Ok(domain) => domain,
            Err(_) => {
                warn!("Reverse name lookup timed out for {}", wallet);
                None
            }
        };

        // A missing catalog would price every holding at zero, so this is
        // the one sub-fetch that aborts instead of degrading.
        let catalog = match catalog {
            Ok(Ok(catalog)) => catalog,
            Ok(Err(e)) => return Err(AssembleError::CatalogUnavailable(e)),
            Err(_) => {
                return Err(AssembleError::CatalogUnavailable(anyhow!(
                    "token catalog fetch timed out"
                )))
            }
        };

        let mut tokens: Vec<EnrichedTokenBalance> = raw_balances
            .iter()
            .map(|balance| EnrichedTokenBalance::from_parts(balance, catalog.get(&balance.mint)))
            .collect();
        tokens.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));

        let token_value: f64 = tokens.iter().map(|token| token.value).sum();
        let total_value = sol_balance * native_price + token_value;

        info!(
            "Portfolio assembled for {}: {} tokens, total ${:.2}",
            wallet,
            tokens.len(),
            total_value
        );

        Ok(PortfolioSnapshot {
            timestamp: Utc::now(),
            address: wallet.to_string(),
            domain,
            sol_balance,
            tokens,
            total_value,
            is_loading: false,
        })
    }
}
