use std::sync::Arc;

use solana_sdk::pubkey::Pubkey;
use tracing::warn;

use crate::error::ResolveError;
use crate::traits::name_service::NameService;

/// Reserved suffix routing a reference through the name registry
pub const NAME_SUFFIX: &str = ".sol";

fn is_base58_char(c: char) -> bool {
    matches!(c, '1'..='9' | 'A'..='H' | 'J'..='N' | 'P'..='Z' | 'a'..='k' | 'm'..='z')
}

/// Charset/length check for a canonical account address
pub fn is_valid_address(reference: &str) -> bool {
    (32..=44).contains(&reference.len()) && reference.chars().all(is_base58_char)
}

/// Normalizes a free-form account reference into a validated address.
///
/// Downstream fetchers assume a pre-validated [`Pubkey`] and skip
/// re-validation, so malformed input must be rejected here.
pub struct AddressResolver {
    name_service: Arc<dyn NameService>,
}

impl AddressResolver {
    pub fn new(name_service: Arc<dyn NameService>) -> Self {
        Self { name_service }
    }

    /// Resolve a raw address or `.sol` name to a canonical address
    pub async fn resolve(&self, reference: &str) -> Result<Pubkey, ResolveError> {
        let reference = reference.trim();

        if reference.ends_with(NAME_SUFFIX) {
            return self.name_service.resolve_name(reference).await;
        }

        if !is_valid_address(reference) {
            return Err(ResolveError::InvalidAddressFormat(reference.to_string()));
        }

        reference
            .parse::<Pubkey>()
            .map_err(|_| ResolveError::InvalidAddressFormat(reference.to_string()))
    }

    /// Forward lookup for the search/landing flow; any failure is `None`
    pub async fn resolve_address_from_name(&self, name: &str) -> Option<Pubkey> {
        match self.name_service.resolve_name(name).await {
            Ok(address) => Some(address),
            Err(e) => {
                warn!("Forward name lookup failed for {}: {}", name, e);
                None
            }
        }
    }

    /// Reverse lookup for display; "no linked name" and transport failures
    /// both come back as `None`, the latter with a warning
    pub async fn resolve_linked_name(&self, wallet: &Pubkey) -> Option<String> {
        match self.name_service.lookup_name(wallet).await {
            Ok(name) => name,
            Err(e) => {
                warn!("Reverse name lookup failed for {}: {:#}", wallet, e);
                None
            }
        }
    }
}
