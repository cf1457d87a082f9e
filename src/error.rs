use thiserror::Error;

/// Failures turning a free-form account reference into a canonical address.
///
/// These fail fast at the resolver; everything past the resolver works with
/// a pre-validated [`Pubkey`](solana_sdk::pubkey::Pubkey).
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("invalid address format: {0}")]
    InvalidAddressFormat(String),

    #[error("no registry record for name: {0}")]
    NameNotFound(String),

    #[error("name service unavailable")]
    NameServiceUnavailable(#[source] anyhow::Error),
}

/// The one failure class that aborts a portfolio assembly.
///
/// A missing catalog would silently price every holding at zero, so it
/// surfaces as an error instead of a degraded snapshot.
#[derive(Debug, Error)]
pub enum AssembleError {
    #[error("token catalog unavailable")]
    CatalogUnavailable(#[source] anyhow::Error),
}
