//! CoinGecko provider implementation.
//!
//! Fetches the trailing year of daily prices for the supported liquid
//! staking tokens, quoted in ETH, from the public `market_chart`
//! endpoint. The demo tier accepts an optional API key passed as a
//! query parameter; without one the anonymous quota applies.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::MarketDataError;
use crate::models::PricePoint;
use crate::provider::traits::PriceHistoryProvider;

const BASE_URL: &str = "https://api.coingecko.com/api/v3";
const PROVIDER_ID: &str = "COINGECKO";
const QUOTE_CURRENCY: &str = "eth";
const HISTORY_DAYS: &str = "365";

/// CoinGecko market data provider.
///
/// Covers a fixed LST universe; symbols outside [`coin_id`] fail with
/// `SymbolNotSupported` before any network round trip.
pub struct CoinGeckoProvider {
    client: Client,
    api_key: Option<String>,
}

// ============================================================================
// Response structures for the CoinGecko API
// ============================================================================

/// `/coins/{id}/market_chart` response.
///
/// Each row is a `[timestamp_millis, value]` pair. Only `prices` is
/// consumed; rows that are short or non-numeric are skipped rather than
/// failing the whole series.
#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    #[serde(default)]
    prices: Vec<Vec<serde_json::Value>>,
}

impl CoinGeckoProvider {
    pub fn new(api_key: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client, api_key }
    }
}

#[async_trait]
impl PriceHistoryProvider for CoinGeckoProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_price_series(&self, symbol: &str) -> Result<Vec<PricePoint>, MarketDataError> {
        let coin_id = coin_id(symbol)
            .ok_or_else(|| MarketDataError::SymbolNotSupported(symbol.to_string()))?;

        let mut params: Vec<(&str, &str)> = vec![
            ("vs_currency", QUOTE_CURRENCY),
            ("days", HISTORY_DAYS),
            ("interval", "daily"),
        ];
        if let Some(key) = &self.api_key {
            params.push(("x_cg_demo_api_key", key));
        }

        let endpoint = format!("{}/coins/{}/market_chart", BASE_URL, coin_id);
        let url = reqwest::Url::parse_with_params(&endpoint, &params).map_err(|e| {
            MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to build URL: {}", e),
            }
        })?;

        let redacted = match &self.api_key {
            Some(key) => url.as_str().replace(key.as_str(), "***"),
            None => url.to_string(),
        };
        debug!("CoinGecko request: {}", redacted);

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                MarketDataError::Timeout {
                    provider: PROVIDER_ID.to_string(),
                }
            } else {
                MarketDataError::Network(e)
            }
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }
        if !status.is_success() {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {}", status),
            });
        }

        let body: MarketChartResponse =
            response
                .json()
                .await
                .map_err(|e| MarketDataError::InvalidResponse {
                    provider: PROVIDER_ID.to_string(),
                    message: format!("Failed to parse response: {}", e),
                })?;

        let points = parse_points(&body.prices);
        debug!(
            "CoinGecko returned {} price points for {} ({})",
            points.len(),
            symbol,
            coin_id
        );
        Ok(points)
    }
}

/// Maps an LST ticker to its CoinGecko coin id. Lookup is
/// case-sensitive and matches the symbols seeded in the token store.
fn coin_id(symbol: &str) -> Option<&'static str> {
    match symbol {
        "wstETH" => Some("wrapped-steth"),
        "rETH" => Some("rocket-pool-eth"),
        "ankrETH" => Some("ankreth"),
        "wBETH" => Some("wrapped-beacon-eth"),
        "pufETH" => Some("pufeth"),
        "LSETH" => Some("liquid-staked-ethereum"),
        "RSETH" => Some("kelp-dao-restaked-eth"),
        "METH" => Some("mantle-staked-ether"),
        "CBETH" => Some("coinbase-wrapped-staked-eth"),
        "TETH" => Some("treehouse-eth"),
        "SFRXETH" => Some("staked-frax-ether"),
        "CDCETH" => Some("crypto-com-staked-eth"),
        "UNIETH" => Some("universal-eth"),
        _ => None,
    }
}

/// Extracts usable `[millis, price]` rows; anything short or
/// non-numeric is dropped.
fn parse_points(rows: &[Vec<serde_json::Value>]) -> Vec<PricePoint> {
    let mut points = Vec::with_capacity(rows.len());
    for row in rows {
        let (Some(ts), Some(price)) = (
            row.first().and_then(serde_json::Value::as_f64),
            row.get(1).and_then(serde_json::Value::as_f64),
        ) else {
            continue;
        };
        let Ok(price) = Decimal::try_from(price) else {
            continue;
        };
        points.push(PricePoint::new(ts as i64, price));
    }
    points
}
