//! Admin token middleware
//!
//! Guards the broadcast and monitoring routes with a static bearer token
//! when one is configured.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use subtle::ConstantTimeEq;

use crate::error::ErrorResponse;
use crate::AppState;

/// Require `Authorization: Bearer <admin token>` when a token is configured
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(expected) = state.config.admin.token() else {
        return next.run(request).await;
    };

    let matches = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|token| tokens_match(token.trim(), expected));

    match matches {
        Some(true) => next.run(request).await,
        Some(false) => unauthorized_response("Invalid admin token"),
        None => unauthorized_response("Missing or invalid Authorization header"),
    }
}

/// Compare tokens in time independent of where they first differ
fn tokens_match(provided: &str, expected: &str) -> bool {
    provided.as_bytes().ct_eq(expected.as_bytes()).into()
}

/// Create unauthorized response
fn unauthorized_response(message: &str) -> Response {
    tracing::warn!("Rejected admin request: {}", message);
    let error = ErrorResponse::new("UNAUTHORIZED", message);
    (StatusCode::UNAUTHORIZED, Json(error)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_match_only_identical_tokens() {
        assert!(tokens_match("s3cret-admin", "s3cret-admin"));
        assert!(!tokens_match("s3cret-admix", "s3cret-admin"));
        assert!(!tokens_match("s3cret", "s3cret-admin"));
        assert!(!tokens_match("", "s3cret-admin"));
    }
}
