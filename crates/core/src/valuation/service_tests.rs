//! Integration-style tests for the valuation orchestration.
//!
//! Mock sources plus the in-memory cache store verify the
//! cache-then-compute flow, failure degradation, and batch semantics
//! without touching the network.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::cache::{CacheEnvelope, CacheError, CacheStore, MemoryCacheStore};
    use crate::errors::Error;
    use crate::tokens::Token;
    use crate::valuation::{
        ValuationCacheTtls, ValuationRemarks, ValuationResult, ValuationService,
        ValuationServiceTrait,
    };
    use stakelens_market_data::{
        MarketDataError, PriceHistoryProvider, PricePoint, SupplySource,
    };

    const DAY_MS: i64 = 86_400_000;
    const WSTETH_CONTRACT: &str = "0x7f39C581F595B53c5cb19bD0b3f8dA6c935E2Ca0";

    // ========================================================================
    // Mocks
    // ========================================================================

    struct MockPriceProvider {
        series: Mutex<HashMap<String, Vec<PricePoint>>>,
        calls: AtomicUsize,
    }

    impl MockPriceProvider {
        fn new() -> Self {
            Self {
                series: Mutex::new(HashMap::new()),
                calls: AtomicUsize::new(0),
            }
        }

        fn with_series(symbol: &str, series: Vec<PricePoint>) -> Self {
            let provider = Self::new();
            provider.set_series(symbol, series);
            provider
        }

        fn set_series(&self, symbol: &str, series: Vec<PricePoint>) {
            self.series
                .lock()
                .unwrap()
                .insert(symbol.to_string(), series);
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PriceHistoryProvider for MockPriceProvider {
        fn id(&self) -> &'static str {
            "MOCK"
        }

        async fn fetch_price_series(
            &self,
            symbol: &str,
        ) -> Result<Vec<PricePoint>, MarketDataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.series
                .lock()
                .unwrap()
                .get(symbol)
                .cloned()
                .ok_or_else(|| MarketDataError::ProviderError {
                    provider: "MOCK".to_string(),
                    message: "Intentional provider failure".to_string(),
                })
        }
    }

    struct MockSupplySource {
        supply: Mutex<Option<u128>>,
        calls: AtomicUsize,
    }

    impl MockSupplySource {
        fn returning(supply: u128) -> Self {
            Self {
                supply: Mutex::new(Some(supply)),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                supply: Mutex::new(None),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SupplySource for MockSupplySource {
        async fn fetch_total_supply(
            &self,
            _contract_address: &str,
        ) -> Result<u128, MarketDataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let supply = *self.supply.lock().unwrap();
            supply.ok_or_else(|| {
                MarketDataError::ContractCall("Intentional contract failure".to_string())
            })
        }
    }

    /// Cache store whose reads and writes can be switched to fail.
    #[derive(Default)]
    struct FlakyCacheStore {
        inner: MemoryCacheStore,
        fail_get: AtomicBool,
        fail_set: AtomicBool,
    }

    #[async_trait]
    impl CacheStore for FlakyCacheStore {
        async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
            if self.fail_get.load(Ordering::SeqCst) {
                return Err(CacheError::ReadFailed("Intentional read failure".into()));
            }
            self.inner.get(key).await
        }

        async fn set(
            &self,
            key: &str,
            value: Vec<u8>,
            ttl: Duration,
        ) -> Result<(), CacheError> {
            if self.fail_set.load(Ordering::SeqCst) {
                return Err(CacheError::WriteFailed("Intentional write failure".into()));
            }
            self.inner.set(key, value, ttl).await
        }

        async fn delete(&self, key: &str) -> Result<(), CacheError> {
            self.inner.delete(key).await
        }
    }

    // ========================================================================
    // Fixtures
    // ========================================================================

    fn token(symbol: &str) -> Token {
        Token {
            id: 1,
            symbol: symbol.to_string(),
            name: format!("{} token", symbol),
            contract_address: WSTETH_CONTRACT.to_string(),
            decimals: 18,
            blockchain: "ethereum".to_string(),
            is_active: true,
        }
    }

    /// `price[i] = 1 + i * 0.001`, one sample per day.
    fn rising_series(len: usize) -> Vec<PricePoint> {
        (0..len)
            .map(|i| {
                PricePoint::new(
                    i as i64 * DAY_MS,
                    dec!(1) + Decimal::from(i as i64) * dec!(0.001),
                )
            })
            .collect()
    }

    fn service(
        provider: Arc<MockPriceProvider>,
        supply: Arc<MockSupplySource>,
        cache: Arc<dyn CacheStore>,
    ) -> ValuationService {
        ValuationService::new(provider, supply, cache, ValuationCacheTtls::default())
    }

    // ========================================================================
    // Tests
    // ========================================================================

    #[tokio::test]
    async fn test_valuation_computed_on_miss_then_served_from_cache() {
        let provider = Arc::new(MockPriceProvider::with_series("wstETH", rising_series(360)));
        let supply = Arc::new(MockSupplySource::returning(
            5_000_000_000_000_000_000_000_000, // 5M tokens at 18 decimals
        ));
        let service = service(
            provider.clone(),
            supply.clone(),
            Arc::new(MemoryCacheStore::new()),
        );

        let first = service.get_valuation(&token("wstETH")).await.unwrap();
        assert_eq!(first.symbol, "wstETH");
        assert_eq!(first.apr, dec!(0.33));
        assert_eq!(first.price, dec!(1.359));
        assert_eq!(first.tvl, dec!(5000000));
        assert_eq!(first.remarks, ValuationRemarks::FairValue);

        let second = service.get_valuation(&token("wstETH")).await.unwrap();
        assert_eq!(second, first);

        // Both sources were consulted exactly once.
        assert_eq!(provider.call_count(), 1);
        assert_eq!(supply.call_count(), 1);
    }

    #[tokio::test]
    async fn test_price_history_cached_across_calls() {
        let provider = Arc::new(MockPriceProvider::with_series("rETH", rising_series(365)));
        let supply = Arc::new(MockSupplySource::failing());
        let service = service(provider.clone(), supply, Arc::new(MemoryCacheStore::new()));

        let first = service.get_price_history("rETH").await.unwrap();
        let second = service.get_price_history("rETH").await.unwrap();

        assert_eq!(first.len(), 365);
        assert_eq!(first, second);
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_price_history_failure_propagates_and_caches_nothing() {
        let store = Arc::new(MemoryCacheStore::new());
        let provider = Arc::new(MockPriceProvider::new());
        let supply = Arc::new(MockSupplySource::returning(1));
        let service = service(provider, supply, store.clone());

        let err = service.get_valuation(&token("wstETH")).await.unwrap_err();
        assert!(matches!(err, Error::MarketData(_)));

        assert_eq!(store.get("price_history:wstETH").await.unwrap(), None);
        assert_eq!(store.get("valuation:wstETH").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_supply_failure_falls_back_to_zero_tvl() {
        let provider = Arc::new(MockPriceProvider::with_series("wstETH", rising_series(360)));
        let supply = Arc::new(MockSupplySource::failing());
        let service = service(
            provider.clone(),
            supply.clone(),
            Arc::new(MemoryCacheStore::new()),
        );

        let result = service.get_valuation(&token("wstETH")).await.unwrap();
        assert_eq!(result.tvl, Decimal::ZERO);
        assert_eq!(result.apr, dec!(0.33));

        // The degraded result is still cached; the failing source is not
        // hammered again on the next call.
        let again = service.get_valuation(&token("wstETH")).await.unwrap();
        assert_eq!(again, result);
        assert_eq!(supply.call_count(), 1);
    }

    #[tokio::test]
    async fn test_get_tvl_surfaces_supply_errors() {
        let provider = Arc::new(MockPriceProvider::new());
        let supply = Arc::new(MockSupplySource::failing());
        let service = service(provider, supply, Arc::new(MemoryCacheStore::new()));

        // Unlike valuation assembly, the raw TVL operation propagates.
        let err = service
            .get_tvl("wstETH", WSTETH_CONTRACT, 18)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::MarketData(MarketDataError::ContractCall(_))
        ));
    }

    #[tokio::test]
    async fn test_get_tvl_scales_by_decimals() {
        let provider = Arc::new(MockPriceProvider::new());
        let supply = Arc::new(MockSupplySource::returning(1_234_500_000_000_000_000_000));
        let service = service(provider, supply.clone(), Arc::new(MemoryCacheStore::new()));

        let tvl = service.get_tvl("wstETH", WSTETH_CONTRACT, 18).await.unwrap();
        assert_eq!(tvl, dec!(1234.5));

        // Cached: a second read does not touch the chain.
        let again = service.get_tvl("wstETH", WSTETH_CONTRACT, 18).await.unwrap();
        assert_eq!(again, tvl);
        assert_eq!(supply.call_count(), 1);
    }

    #[tokio::test]
    async fn test_cache_write_failure_still_returns_result() {
        let store = Arc::new(FlakyCacheStore::default());
        store.fail_set.store(true, Ordering::SeqCst);
        let provider = Arc::new(MockPriceProvider::with_series("wstETH", rising_series(360)));
        let supply = Arc::new(MockSupplySource::returning(1_000_000_000_000_000_000));
        let service = service(provider.clone(), supply, store.clone());

        let result = service.get_valuation(&token("wstETH")).await.unwrap();
        assert_eq!(result.apr, dec!(0.33));

        // Nothing could be cached, so the next call recomputes.
        service.get_valuation(&token("wstETH")).await.unwrap();
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn test_cache_read_failure_treated_as_miss() {
        let store = Arc::new(FlakyCacheStore::default());
        store.fail_get.store(true, Ordering::SeqCst);
        let provider = Arc::new(MockPriceProvider::with_series("wstETH", rising_series(360)));
        let supply = Arc::new(MockSupplySource::returning(1_000_000_000_000_000_000));
        let service = service(provider.clone(), supply, store);

        let result = service.get_valuation(&token("wstETH")).await.unwrap();
        assert_eq!(result.apr, dec!(0.33));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_batch_skips_failed_tokens() {
        let provider = Arc::new(MockPriceProvider::with_series("wstETH", rising_series(360)));
        // rETH has no series and will fail; wstETH succeeds.
        let supply = Arc::new(MockSupplySource::returning(1_000_000_000_000_000_000));
        let service = service(provider, supply, Arc::new(MemoryCacheStore::new()));

        let results = service
            .get_all_valuations(&[token("rETH"), token("wstETH")])
            .await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].symbol, "wstETH");
    }

    #[tokio::test]
    async fn test_batch_of_empty_token_set_is_empty() {
        let provider = Arc::new(MockPriceProvider::new());
        let supply = Arc::new(MockSupplySource::failing());
        let service = service(provider, supply, Arc::new(MemoryCacheStore::new()));

        assert!(service.get_all_valuations(&[]).await.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_cache_entry_recomputes() {
        let store = Arc::new(MemoryCacheStore::new());
        store
            .set(
                "valuation:wstETH",
                b"corrupted".to_vec(),
                Duration::from_secs(600),
            )
            .await
            .unwrap();

        let provider = Arc::new(MockPriceProvider::with_series("wstETH", rising_series(360)));
        let supply = Arc::new(MockSupplySource::returning(1_000_000_000_000_000_000));
        let service = service(provider.clone(), supply, store);

        let result = service.get_valuation(&token("wstETH")).await.unwrap();
        assert_eq!(result.apr, dec!(0.33));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_expired_cached_valuation_is_refetched() {
        let store = Arc::new(MemoryCacheStore::new());

        // Stale envelope whose own expiry has passed, while the backend
        // entry is still alive.
        let now = Utc::now();
        let stale = CacheEnvelope {
            payload: ValuationResult {
                symbol: "wstETH".to_string(),
                price: dec!(9.99),
                apr: Decimal::ZERO,
                stability: Decimal::ONE,
                tvl: Decimal::ZERO,
                remarks: ValuationRemarks::Unknown,
                computed_at: now - chrono::Duration::hours(2),
            },
            cached_at: now - chrono::Duration::hours(2),
            expires_at: now - chrono::Duration::hours(1),
        };
        store
            .set(
                "valuation:wstETH",
                serde_json::to_vec(&stale).unwrap(),
                Duration::from_secs(600),
            )
            .await
            .unwrap();

        let provider = Arc::new(MockPriceProvider::with_series("wstETH", rising_series(360)));
        let supply = Arc::new(MockSupplySource::returning(1_000_000_000_000_000_000));
        let service = service(provider.clone(), supply, store);

        let result = service.get_valuation(&token("wstETH")).await.unwrap();
        assert_eq!(result.price, dec!(1.359));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_invalidate_clears_every_artifact() {
        let store = Arc::new(MemoryCacheStore::new());
        let provider = Arc::new(MockPriceProvider::with_series("wstETH", rising_series(360)));
        let supply = Arc::new(MockSupplySource::returning(1_000_000_000_000_000_000));
        let service = service(provider.clone(), supply, store.clone());

        service.get_valuation(&token("wstETH")).await.unwrap();
        assert!(store.get("valuation:wstETH").await.unwrap().is_some());
        assert!(store.get("price_history:wstETH").await.unwrap().is_some());
        assert!(store.get("tvl:wstETH").await.unwrap().is_some());

        service.invalidate("wstETH").await;
        assert_eq!(store.get("valuation:wstETH").await.unwrap(), None);
        assert_eq!(store.get("price_history:wstETH").await.unwrap(), None);
        assert_eq!(store.get("tvl:wstETH").await.unwrap(), None);

        service.get_valuation(&token("wstETH")).await.unwrap();
        assert_eq!(provider.call_count(), 2);
    }
}
