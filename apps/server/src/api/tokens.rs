use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

/// List the active token universe.
async fn get_tokens(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    let tokens = state.token_service.list_tokens().await?;
    Ok(Json(json!({
        "count": tokens.len(),
        "tokens": tokens,
    })))
}

/// Trailing daily price history for one token.
async fn get_token_history(
    Path(symbol): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Value>> {
    // Resolve through the token store first so unknown symbols fail
    // before any provider round trip.
    let token = state.token_service.get_token(&symbol).await?;
    let history = state
        .valuation_service
        .get_price_history(&token.symbol)
        .await?;
    Ok(Json(json!({
        "tokenSymbol": token.symbol,
        "count": history.len(),
        "priceHistory": history,
    })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tokens", get(get_tokens))
        .route("/token/{symbol}/history", get(get_token_history))
}
