//! Wallet-portfolio aggregation for Solana
//!
//! A read-side library that turns an account reference (raw address or
//! `.sol` name) into a consolidated valuation snapshot: native balance,
//! enriched token balances, per-asset and aggregate fiat value, plus a
//! paginated transaction history. There is no write path to the ledger.

// Public modules - these are the API surface
pub mod assembler;
pub mod config;
pub mod error;
pub mod fx;
pub mod models;
pub mod providers;
pub mod resolver;
pub mod traits;
pub mod utils;

// Re-export commonly used items for easier access
pub use assembler::portfolio_assembler::PortfolioAssembler;
pub use config::AggregatorConfig;
pub use error::{AssembleError, ResolveError};
pub use fx::{convert, Currency, RateTable};
pub use models::{
    portfolio::PortfolioSnapshot,
    token::{EnrichedTokenBalance, TokenBalance, TokenMetadata},
    transaction::{NativeTransfer, TokenTransfer, TransactionEntry},
};
pub use providers::{
    catalog::JupiterCatalog,
    name::HttpNameService,
    price::{CoinGeckoOracle, JupiterPriceOracle, OracleChain},
    rates::ExchangeRateSource,
    rpc::RpcBalanceSource,
    transactions::{next_cursor, TransactionHistory},
};
pub use resolver::AddressResolver;
pub use traits::{
    balance_source::BalanceSource, name_service::NameService, price_oracle::PriceOracle,
    token_catalog::TokenCatalog,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type alias for library functions
pub type Result<T> = std::result::Result<T, anyhow::Error>;
