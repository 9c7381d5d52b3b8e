//! On-chain total supply source.
//!
//! TVL for an LST derives from the token contract's `totalSupply()`,
//! read through a plain JSON-RPC `eth_call`. A single constant selector
//! returning one 256-bit word needs no ABI machinery.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::errors::MarketDataError;

const SOURCE_ID: &str = "EVM_RPC";
/// First four bytes of `keccak256("totalSupply()")`.
const TOTAL_SUPPLY_SELECTOR: &str = "0x18160ddd";

/// Trait for sources of on-chain token supply.
#[async_trait]
pub trait SupplySource: Send + Sync {
    /// Fetch the raw total supply of a token contract, unscaled.
    ///
    /// Callers apply `10^-decimals` scaling themselves.
    async fn fetch_total_supply(&self, contract_address: &str) -> Result<u128, MarketDataError>;
}

/// JSON-RPC client reading ERC-20 supply from an EVM endpoint.
pub struct EvmSupplyClient {
    client: Client,
    endpoint: String,
}

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'a str,
    method: &'a str,
    params: serde_json::Value,
    id: u32,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<String>,
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

impl EvmSupplyClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl SupplySource for EvmSupplyClient {
    async fn fetch_total_supply(&self, contract_address: &str) -> Result<u128, MarketDataError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            method: "eth_call",
            params: json!([
                { "to": contract_address, "data": TOTAL_SUPPLY_SELECTOR },
                "latest"
            ]),
            id: 1,
        };

        debug!("eth_call totalSupply for {}", contract_address);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MarketDataError::Timeout {
                        provider: SOURCE_ID.to_string(),
                    }
                } else {
                    MarketDataError::Network(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(MarketDataError::ProviderError {
                provider: SOURCE_ID.to_string(),
                message: format!("HTTP {}", status),
            });
        }

        let body: RpcResponse =
            response
                .json()
                .await
                .map_err(|e| MarketDataError::InvalidResponse {
                    provider: SOURCE_ID.to_string(),
                    message: format!("Failed to parse response: {}", e),
                })?;

        if let Some(error) = body.error {
            return Err(MarketDataError::ContractCall(format!(
                "{} (code {})",
                error.message, error.code
            )));
        }

        let word = body.result.ok_or_else(|| MarketDataError::InvalidResponse {
            provider: SOURCE_ID.to_string(),
            message: "missing result field".to_string(),
        })?;

        parse_supply_word(&word)
    }
}

/// Parses a 0x-prefixed hex word into a raw supply value.
///
/// `eth_call` returns the full 256-bit word; supplies beyond u128 range
/// are rejected rather than silently truncated.
fn parse_supply_word(word: &str) -> Result<u128, MarketDataError> {
    let hex = word.strip_prefix("0x").unwrap_or(word);
    if hex.is_empty() {
        return Err(MarketDataError::ContractCall(
            "empty return data from totalSupply call".to_string(),
        ));
    }
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(MarketDataError::ContractCall(format!(
            "malformed hex word: {}",
            word
        )));
    }

    let significant = hex.trim_start_matches('0');
    if significant.is_empty() {
        return Ok(0);
    }
    // u128 holds 32 hex digits.
    if significant.len() > 32 {
        return Err(MarketDataError::ContractCall(format!(
            "total supply exceeds u128 range: {}",
            word
        )));
    }
    u128::from_str_radix(significant, 16).map_err(|e| {
        MarketDataError::ContractCall(format!("malformed hex word {}: {}", word, e))
    })
}
