use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use stakelens_core::ValuationResult;

/// Cached valuation for one token.
async fn get_token_valuation(
    Path(symbol): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ValuationResult>> {
    let token = state.token_service.get_token(&symbol).await?;
    let valuation = state.valuation_service.get_valuation(&token).await?;
    Ok(Json(valuation))
}

/// Valuations for every active token. Tokens whose valuation fails are
/// skipped, so the payload may carry fewer entries than the universe.
async fn get_all_valuations(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    let tokens = state.token_service.list_tokens().await?;
    let valuations = state.valuation_service.get_all_valuations(&tokens).await;
    Ok(Json(json!({
        "count": valuations.len(),
        "valuations": valuations,
    })))
}

/// Drop all cached artifacts for every active token.
async fn refresh_cache(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    let tokens = state.token_service.list_tokens().await?;
    for token in &tokens {
        state.valuation_service.invalidate(&token.symbol).await;
    }
    Ok(Json(json!({ "invalidated": tokens.len() })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/token/{symbol}/valuation", get(get_token_valuation))
        .route("/valuations", get(get_all_valuations))
        .route("/cache/refresh", post(refresh_cache))
}
