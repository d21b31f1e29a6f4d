//! Session extractor.
//!
//! The `X-Session-ID` header names the caller. Its value is used verbatim as
//! the owner of every product the caller creates, lists or deletes.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use pricewatch_types::product::{MAX_OWNER_LEN, OwnerId};

use crate::http::error::AppError;
use crate::state::AppState;

pub const SESSION_HEADER: &str = "x-session-id";

/// The caller's owner id, taken from `X-Session-ID`.
pub struct Session(pub OwnerId);

impl FromRequestParts<AppState> for Session {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        session_from_parts(parts).map(Session)
    }
}

fn session_from_parts(parts: &Parts) -> Result<OwnerId, AppError> {
    let value = parts
        .headers
        .get(SESSION_HEADER)
        .ok_or_else(|| AppError::MissingSession("X-Session-ID header is required".to_string()))?;

    let value = value.to_str().map_err(|_| {
        AppError::MissingSession("Invalid X-Session-ID header encoding".to_string())
    })?;

    if value.is_empty() {
        return Err(AppError::MissingSession(
            "X-Session-ID header is required".to_string(),
        ));
    }
    if value.chars().count() > MAX_OWNER_LEN {
        return Err(AppError::MissingSession(format!(
            "X-Session-ID must be at most {MAX_OWNER_LEN} characters"
        )));
    }

    Ok(OwnerId::new(value))
}
