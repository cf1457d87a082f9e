use async_trait::async_trait;

/// Trait for live native-asset price sources
#[async_trait]
pub trait PriceOracle: Send + Sync {
    /// Reference USD price for the native asset
    async fn fetch_native_price(&self) -> anyhow::Result<f64>;

    /// Source identity, used when logging fallbacks
    fn source_name(&self) -> &str;
}
