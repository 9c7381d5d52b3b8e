//! Environment-driven server configuration.

use std::time::Duration;

use stakelens_core::constants::{
    DEFAULT_PRICE_HISTORY_TTL_SECS, DEFAULT_TVL_TTL_SECS, DEFAULT_VALUATION_TTL_SECS,
};

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub database_url: String,
    pub redis_url: String,
    pub ethereum_rpc_url: String,
    pub coingecko_api_key: Option<String>,
    pub cors_allowed_origins: Vec<String>,
    pub price_history_ttl: Duration,
    pub tvl_ttl: Duration,
    pub valuation_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Self {
            listen_addr: format!("0.0.0.0:{}", port),
            database_url: env_or("DATABASE_URL", "stakelens.db"),
            redis_url: env_or("REDIS_URL", "redis://127.0.0.1:6379"),
            ethereum_rpc_url: env_or("ETHEREUM_RPC_URL", "https://ethereum-rpc.publicnode.com"),
            coingecko_api_key: std::env::var("COINGECKO_API_KEY")
                .ok()
                .map(|key| key.trim().to_string())
                .filter(|key| !key.is_empty()),
            cors_allowed_origins,
            price_history_ttl: ttl_from_env(
                "PRICE_HISTORY_CACHE_TTL_SECS",
                DEFAULT_PRICE_HISTORY_TTL_SECS,
            ),
            tvl_ttl: ttl_from_env("TVL_CACHE_TTL_SECS", DEFAULT_TVL_TTL_SECS),
            valuation_ttl: ttl_from_env("VALUATION_CACHE_TTL_SECS", DEFAULT_VALUATION_TTL_SECS),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn ttl_from_env(key: &str, default_secs: u64) -> Duration {
    let secs = std::env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default_secs);
    Duration::from_secs(secs)
}
