use chrono::NaiveDateTime;
use diesel::prelude::*;

use stakelens_core::Token;

use crate::schema::tokens;

/// Database row for a tracked liquid staking token.
///
/// Carries the bookkeeping columns (`created_at`, `updated_at`) that the
/// domain-level [`Token`] does not expose.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = tokens)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TokenRecord {
    pub id: i32,
    pub symbol: String,
    pub name: String,
    pub contract_address: String,
    pub decimals: i32,
    pub blockchain: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<TokenRecord> for Token {
    fn from(record: TokenRecord) -> Self {
        Token {
            id: record.id,
            symbol: record.symbol,
            name: record.name,
            contract_address: record.contract_address,
            decimals: record.decimals,
            blockchain: record.blockchain,
            is_active: record.is_active,
        }
    }
}
