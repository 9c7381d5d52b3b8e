//! Valuation orchestration.
//!
//! Cache-then-compute, one state machine per artifact: hit returns
//! immediately; a miss fetches, computes, writes back best-effort, and
//! returns. Price history is a hard dependency, TVL degrades to zero at
//! valuation assembly, cache failures degrade to misses. There is no
//! request deduplication and no internal retry; concurrent misses for
//! the same symbol race benignly (last write wins, all callers get
//! correct results).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, warn};
use rust_decimal::Decimal;

use stakelens_market_data::{PriceHistoryProvider, PricePoint, SupplySource};

use super::engine;
use super::model::{TvlSnapshot, ValuationResult};
use crate::cache::{CacheStore, CachedArtifact};
use crate::constants::{
    DEFAULT_PRICE_HISTORY_TTL_SECS, DEFAULT_TVL_TTL_SECS, DEFAULT_VALUATION_TTL_SECS,
    PRICE_HISTORY_KEY_PREFIX, TVL_KEY_PREFIX, VALUATION_KEY_PREFIX,
};
use crate::errors::{Error, Result};
use crate::tokens::Token;

// ============================================================================
// Service trait
// ============================================================================

/// Valuation operations exposed to the transport layer.
#[async_trait]
pub trait ValuationServiceTrait: Send + Sync {
    /// Trailing daily price series for a symbol, cached.
    async fn get_price_history(&self, symbol: &str) -> Result<Vec<PricePoint>>;

    /// Current TVL for a token contract, cached.
    ///
    /// Errors surface to the caller here; the zero-fallback applies only
    /// inside [`get_valuation`](Self::get_valuation).
    async fn get_tvl(&self, symbol: &str, contract_address: &str, decimals: i32)
        -> Result<Decimal>;

    /// Full valuation for a token, cached.
    async fn get_valuation(&self, token: &Token) -> Result<ValuationResult>;

    /// Valuations for a token set. Per-token failures are logged and
    /// skipped; the batch itself never fails.
    async fn get_all_valuations(&self, tokens: &[Token]) -> Vec<ValuationResult>;

    /// Drop every cached artifact for a symbol.
    async fn invalidate(&self, symbol: &str);
}

// ============================================================================
// Service implementation
// ============================================================================

/// Per-artifact TTLs for the cache layers.
#[derive(Debug, Clone, Copy)]
pub struct ValuationCacheTtls {
    pub price_history: Duration,
    pub tvl: Duration,
    pub valuation: Duration,
}

impl Default for ValuationCacheTtls {
    fn default() -> Self {
        Self {
            price_history: Duration::from_secs(DEFAULT_PRICE_HISTORY_TTL_SECS),
            tvl: Duration::from_secs(DEFAULT_TVL_TTL_SECS),
            valuation: Duration::from_secs(DEFAULT_VALUATION_TTL_SECS),
        }
    }
}

/// Orchestrates cached price history, TVL reads, and valuation
/// computation over injected sources.
pub struct ValuationService {
    price_provider: Arc<dyn PriceHistoryProvider>,
    supply_source: Arc<dyn SupplySource>,
    price_history: CachedArtifact<Vec<PricePoint>>,
    tvl: CachedArtifact<TvlSnapshot>,
    valuation: CachedArtifact<ValuationResult>,
}

impl ValuationService {
    pub fn new(
        price_provider: Arc<dyn PriceHistoryProvider>,
        supply_source: Arc<dyn SupplySource>,
        cache: Arc<dyn CacheStore>,
        ttls: ValuationCacheTtls,
    ) -> Self {
        Self {
            price_provider,
            supply_source,
            price_history: CachedArtifact::new(
                cache.clone(),
                PRICE_HISTORY_KEY_PREFIX,
                ttls.price_history,
            ),
            tvl: CachedArtifact::new(cache.clone(), TVL_KEY_PREFIX, ttls.tvl),
            valuation: CachedArtifact::new(cache, VALUATION_KEY_PREFIX, ttls.valuation),
        }
    }
}

#[async_trait]
impl ValuationServiceTrait for ValuationService {
    async fn get_price_history(&self, symbol: &str) -> Result<Vec<PricePoint>> {
        let provider = self.price_provider.clone();
        let owned = symbol.to_string();
        self.price_history
            .get_or_fetch(symbol, || async move {
                debug!("Fetching price history for {}", owned);
                Ok(provider.fetch_price_series(&owned).await?)
            })
            .await
    }

    async fn get_tvl(
        &self,
        symbol: &str,
        contract_address: &str,
        decimals: i32,
    ) -> Result<Decimal> {
        let supply_source = self.supply_source.clone();
        let contract = contract_address.to_string();
        let owned = symbol.to_string();
        let snapshot = self
            .tvl
            .get_or_fetch(symbol, || async move {
                debug!("Fetching total supply for {} ({})", owned, contract);
                let raw = supply_source.fetch_total_supply(&contract).await?;
                let tvl = scale_supply(raw, decimals)?;
                Ok(TvlSnapshot {
                    symbol: owned,
                    tvl,
                    as_of: Utc::now(),
                })
            })
            .await?;
        Ok(snapshot.tvl)
    }

    async fn get_valuation(&self, token: &Token) -> Result<ValuationResult> {
        if let Some(hit) = self.valuation.get(&token.symbol).await {
            debug!("Valuation cache hit for {}", token.symbol);
            return Ok(hit);
        }

        // Price history is the primary input: no fallback, errors propagate.
        let series = self.get_price_history(&token.symbol).await?;

        // TVL is a soft dependency: a failed supply read degrades to zero.
        let tvl = match self
            .get_tvl(&token.symbol, &token.contract_address, token.decimals)
            .await
        {
            Ok(tvl) => tvl,
            Err(e) => {
                warn!("TVL unavailable for {}, falling back to 0: {}", token.symbol, e);
                Decimal::ZERO
            }
        };

        let result = engine::compute_valuation(&token.symbol, &series, tvl)?;

        // A correct result exists; a failed write must not take it down.
        self.valuation.put(&token.symbol, &result).await;
        Ok(result)
    }

    async fn get_all_valuations(&self, tokens: &[Token]) -> Vec<ValuationResult> {
        let mut results = Vec::with_capacity(tokens.len());
        for token in tokens {
            match self.get_valuation(token).await {
                Ok(result) => results.push(result),
                Err(e) => warn!("Skipping valuation for {}: {}", token.symbol, e),
            }
        }
        results
    }

    async fn invalidate(&self, symbol: &str) {
        self.price_history.invalidate(symbol).await;
        self.tvl.invalidate(symbol).await;
        self.valuation.invalidate(symbol).await;
    }
}

/// Converts a raw on-chain supply into token units (`raw * 10^-decimals`).
fn scale_supply(raw: u128, decimals: i32) -> Result<Decimal> {
    let mantissa = i128::try_from(raw)
        .map_err(|_| Error::Unexpected(format!("Total supply {} exceeds supported range", raw)))?;
    let scale = u32::try_from(decimals)
        .map_err(|_| Error::Unexpected(format!("Invalid token decimals: {}", decimals)))?;
    Decimal::try_from_i128_with_scale(mantissa, scale)
        .map_err(|e| Error::Unexpected(format!("Total supply {} not representable: {}", raw, e)))
}
