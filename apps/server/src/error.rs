//! API error envelope and error-to-status mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{error, warn};

use stakelens_core::valuation::ValuationError;
use stakelens_core::Error;
use stakelens_market_data::MarketDataError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Error returned to HTTP clients as `{"error": message}` with a
/// mapped status code.
#[derive(Debug)]
pub struct ApiError {
    pub(crate) status: StatusCode,
    pub(crate) message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!("{} ({})", self.message, self.status);
        } else {
            warn!("{} ({})", self.message, self.status);
        }
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = match &err {
            // Unknown or unsupported tokens are client errors.
            _ if err.is_not_found() => StatusCode::BAD_REQUEST,
            Error::MarketData(MarketDataError::SymbolNotSupported(_)) => StatusCode::BAD_REQUEST,
            // The series exists but cannot support the computation yet.
            Error::Valuation(
                ValuationError::InsufficientData { .. }
                | ValuationError::InsufficientMonthlyData { .. },
            ) => StatusCode::UNPROCESSABLE_ENTITY,
            // Upstream source failures.
            Error::MarketData(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}
