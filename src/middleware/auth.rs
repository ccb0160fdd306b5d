//! Admin authentication middleware

use axum::{
    body::Body,
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use subtle::ConstantTimeEq;
use tracing::debug;

use crate::{error::AppError, state::AppState};

/// Require `Authorization: Bearer <ADMIN_TOKEN>`.
///
/// Rejects every request when no admin token is configured.
pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path().to_string();

    let Some(expected) = state.config().admin.token.as_deref() else {
        debug!(path = %path, "Admin auth failed: no admin token configured");
        return Err(AppError::Unauthorized);
    };

    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    match token {
        Some(token) if bool::from(token.as_bytes().ct_eq(expected.as_bytes())) => {
            Ok(next.run(request).await)
        }
        Some(_) => {
            debug!(path = %path, "Admin auth failed: token mismatch");
            Err(AppError::Unauthorized)
        }
        None => {
            debug!(path = %path, "Admin auth failed: missing or malformed Authorization header");
            Err(AppError::Unauthorized)
        }
    }
}
