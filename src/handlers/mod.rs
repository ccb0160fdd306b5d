//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod admin;
pub mod competitions;
pub mod health;
pub mod submissions;

use axum::{middleware, Router};

use crate::{middleware::admin_auth_middleware, state::AppState};

/// Create all API routes
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .nest("/submissions", submissions::routes())
        .nest("/competitions", competitions::routes())
        .nest(
            "/admin",
            admin::routes().route_layer(middleware::from_fn_with_state(state, admin_auth_middleware)),
        )
}
