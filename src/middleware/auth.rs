use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::error::{AppError, AppResult};

/// HTTP header name carrying the inbound API key
pub const API_KEY_HEADER: &str = "x-api-key";

/// Middleware that rejects requests without the configured API key.
///
/// A missing or mismatched key is treated as invalid input, matching
/// the validation-error surface of the rest of the request checks.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> AppResult<Response> {
    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    if provided != Some(state.api_key.as_ref()) {
        return Err(AppError::InvalidInput("api key is invalid".to_string()));
    }

    Ok(next.run(request).await)
}
