//! Token service.

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::errors::TokenError;
use super::model::Token;
use super::store::TokenStore;
use crate::errors::Result;

// ============================================================================
// Service trait
// ============================================================================

/// Token lookup operations exposed to the transport layer.
#[async_trait]
pub trait TokenServiceTrait: Send + Sync {
    /// List the supported (active) token set, ordered by symbol.
    async fn list_tokens(&self) -> Result<Vec<Token>>;

    /// Resolve a symbol to its token; unknown or inactive symbols fail
    /// with [`TokenError::NotFound`].
    async fn get_token(&self, symbol: &str) -> Result<Token>;
}

// ============================================================================
// Service implementation
// ============================================================================

/// Service for token metadata lookups.
pub struct TokenService {
    store: Arc<dyn TokenStore>,
}

impl TokenService {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl TokenServiceTrait for TokenService {
    async fn list_tokens(&self) -> Result<Vec<Token>> {
        let tokens = self.store.list_active().await?;
        debug!("Loaded {} active tokens", tokens.len());
        Ok(tokens)
    }

    async fn get_token(&self, symbol: &str) -> Result<Token> {
        self.store
            .get_by_symbol(symbol)
            .await?
            .ok_or_else(|| TokenError::NotFound(symbol.to_string()).into())
    }
}
