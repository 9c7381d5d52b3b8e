//! Token domain model.

use serde::{Deserialize, Serialize};

/// A supported liquid staking token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub id: i32,
    /// Ticker used as the lookup key everywhere (case-sensitive).
    pub symbol: String,
    pub name: String,
    /// ERC-20 contract address, 0x-prefixed.
    pub contract_address: String,
    /// On-chain decimals used to scale raw supply.
    pub decimals: i32,
    pub blockchain: String,
    pub is_active: bool,
}
