//! Providers backing the aggregation pipeline's trait seams

pub mod catalog;
pub mod name;
pub mod price;
pub mod rates;
pub mod rpc;
pub mod transactions;

// Re-export for convenience
pub use catalog::JupiterCatalog;
pub use name::HttpNameService;
pub use price::{CoinGeckoOracle, JupiterPriceOracle, OracleChain};
pub use rates::ExchangeRateSource;
pub use rpc::RpcBalanceSource;
pub use transactions::TransactionHistory;
