//! Core traits for the portfolio aggregator

pub mod balance_source;
pub mod name_service;
pub mod price_oracle;
pub mod token_catalog;

// Re-export for convenience
pub use balance_source::BalanceSource;
pub use name_service::NameService;
pub use price_oracle::PriceOracle;
pub use token_catalog::TokenCatalog;
