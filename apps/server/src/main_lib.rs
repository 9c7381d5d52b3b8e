use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use stakelens_cache_redis::RedisCacheStore;
use stakelens_core::cache::{CacheStore, MemoryCacheStore};
use stakelens_core::tokens::{TokenService, TokenServiceTrait};
use stakelens_core::valuation::{ValuationCacheTtls, ValuationService, ValuationServiceTrait};
use stakelens_market_data::{CoinGeckoProvider, EvmSupplyClient};
use stakelens_storage_sqlite::{create_pool, run_migrations, TokenRepository};

use crate::config::Config;

pub struct AppState {
    pub token_service: Arc<dyn TokenServiceTrait + Send + Sync>,
    pub valuation_service: Arc<dyn ValuationServiceTrait + Send + Sync>,
}

pub fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let pool = create_pool(&config.database_url)?;
    run_migrations(&pool)?;
    tracing::info!("Database ready at {}", config.database_url);

    // Redis being down is not fatal; valuations still work with a
    // process-local cache, just without sharing across instances.
    let cache: Arc<dyn CacheStore> = match RedisCacheStore::connect(&config.redis_url).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::warn!("Redis unavailable ({}), continuing with in-memory cache", e);
            Arc::new(MemoryCacheStore::new())
        }
    };

    let token_repository = Arc::new(TokenRepository::new(pool));
    let token_service: Arc<dyn TokenServiceTrait + Send + Sync> =
        Arc::new(TokenService::new(token_repository));

    let price_provider = Arc::new(CoinGeckoProvider::new(config.coingecko_api_key.clone()));
    let supply_source = Arc::new(EvmSupplyClient::new(&config.ethereum_rpc_url));

    let ttls = ValuationCacheTtls {
        price_history: config.price_history_ttl,
        tvl: config.tvl_ttl,
        valuation: config.valuation_ttl,
    };
    let valuation_service: Arc<dyn ValuationServiceTrait + Send + Sync> = Arc::new(
        ValuationService::new(price_provider, supply_source, cache, ttls),
    );

    Ok(Arc::new(AppState {
        token_service,
        valuation_service,
    }))
}
