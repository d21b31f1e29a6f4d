//! Application error type mapping to HTTP status codes.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use pricewatch_types::error::ProductError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Product use-case errors.
    Product(ProductError),
    /// `X-Session-ID` absent, empty or unusable.
    MissingSession(String),
    /// Body or path could not be decoded.
    Unprocessable(String),
}

impl From<ProductError> for AppError {
    fn from(e: ProductError) -> Self {
        AppError::Product(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AppError::Product(ProductError::NotFound | ProductError::NoPriceHistory) => {
                (StatusCode::NOT_FOUND, "Product not found".to_string())
            }
            AppError::Product(
                ProductError::InvalidUrl(msg) | ProductError::InvalidSnapshot(msg),
            ) => (StatusCode::BAD_REQUEST, msg),
            AppError::Product(ProductError::Storage(msg)) => {
                tracing::error!(error = %msg, "request failed on storage");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::MissingSession(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unprocessable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
