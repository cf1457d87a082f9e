//! Data models for the portfolio aggregator

pub mod portfolio;
pub mod token;
pub mod transaction;

// Re-export for convenience
pub use portfolio::PortfolioSnapshot;
pub use token::{EnrichedTokenBalance, TokenBalance, TokenMetadata};
pub use transaction::{NativeTransfer, TokenTransfer, TransactionEntry};
