use async_trait::async_trait;
use diesel::prelude::*;

use stakelens_core::tokens::TokenStore;
use stakelens_core::{Result, Token};

use crate::db::{get_connection, DbPool};
use crate::errors::StorageError;
use crate::schema::tokens;
use crate::tokens::model::TokenRecord;

/// Diesel-backed [`TokenStore`] over the seeded `tokens` table.
pub struct TokenRepository {
    pool: DbPool,
}

impl TokenRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn list_active_impl(&self) -> Result<Vec<Token>> {
        let mut conn = get_connection(&self.pool)?;

        let records = tokens::table
            .filter(tokens::is_active.eq(true))
            .order(tokens::symbol.asc())
            .select(TokenRecord::as_select())
            .load::<TokenRecord>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(records.into_iter().map(Token::from).collect())
    }

    pub fn get_by_symbol_impl(&self, symbol: &str) -> Result<Option<Token>> {
        let mut conn = get_connection(&self.pool)?;

        // Symbol matching is exact; SQLite TEXT equality is case sensitive.
        let record = tokens::table
            .filter(tokens::symbol.eq(symbol))
            .filter(tokens::is_active.eq(true))
            .select(TokenRecord::as_select())
            .first::<TokenRecord>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;

        Ok(record.map(Token::from))
    }
}

#[async_trait]
impl TokenStore for TokenRepository {
    async fn list_active(&self) -> Result<Vec<Token>> {
        self.list_active_impl()
    }

    async fn get_by_symbol(&self, symbol: &str) -> Result<Option<Token>> {
        self.get_by_symbol_impl(symbol)
    }
}
