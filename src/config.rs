use std::time::Duration;

/// Endpoints and limits for the aggregation pipeline.
///
/// Everything the providers talk to is injected here at construction time,
/// so the whole pipeline can be pointed at mock endpoints in tests.
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Ledger JSON-RPC endpoint
    pub rpc_url: String,
    /// Bulk token list endpoint (JSON array of token records)
    pub token_catalog_url: String,
    /// Primary native-asset price endpoint
    pub price_api_url: String,
    /// Secondary price endpoint, tried when the primary yields nothing usable
    pub price_fallback_url: String,
    /// Foreign-exchange rate table endpoint
    pub exchange_rates_url: String,
    /// Name-service gateway for forward and reverse lookups
    pub name_service_url: String,
    /// Transaction history API base
    pub tx_api_url: String,
    /// Optional API key appended to transaction history requests
    pub tx_api_key: Option<String>,
    /// Deadline for any single network call
    pub request_timeout: Duration,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            rpc_url: "https://api.mainnet-beta.solana.com".to_string(),
            token_catalog_url: "https://token.jup.ag/all".to_string(),
            price_api_url: "https://api.coingecko.com/api/v3/simple/price?ids=solana&vs_currencies=usd"
                .to_string(),
            price_fallback_url: "https://price.jup.ag/v6/price?ids=SOL".to_string(),
            exchange_rates_url: "https://api.coingecko.com/api/v3/exchange_rates".to_string(),
            name_service_url: "https://api.solscan.io/account".to_string(),
            tx_api_url: "https://api.helius.xyz".to_string(),
            tx_api_key: None,
            request_timeout: Duration::from_secs(5),
        }
    }
}

impl AggregatorConfig {
    /// Build a config from the environment, falling back to the public
    /// mainnet endpoints for anything unset. Loads `.env` first.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(v) = std::env::var("SOLANA_RPC_URL") {
            config.rpc_url = v;
        }
        if let Ok(v) = std::env::var("TOKEN_CATALOG_URL") {
            config.token_catalog_url = v;
        }
        if let Ok(v) = std::env::var("PRICE_API_URL") {
            config.price_api_url = v;
        }
        if let Ok(v) = std::env::var("PRICE_FALLBACK_URL") {
            config.price_fallback_url = v;
        }
        if let Ok(v) = std::env::var("EXCHANGE_RATES_URL") {
            config.exchange_rates_url = v;
        }
        if let Ok(v) = std::env::var("NAME_SERVICE_URL") {
            config.name_service_url = v;
        }
        if let Ok(v) = std::env::var("TX_API_URL") {
            config.tx_api_url = v;
        }
        if let Ok(v) = std::env::var("TX_API_KEY") {
            config.tx_api_key = Some(v);
        }
        if let Some(ms) = std::env::var("REQUEST_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.request_timeout = Duration::from_millis(ms);
        }

        config
    }
}
