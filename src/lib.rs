//! Mathscore - live scoring for timed numeric-answer competitions
//!
//! Contestants submit integer answers to competition problems. Every
//! submission is scored on arrival and appended to an event store, and the
//! leaderboard is folded from that history at query time.
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: scoring, leaderboard and admin logic
//! - **Scoring**: pure bonus rules and per-key serialization
//! - **Storage**: `Catalog` / `EventStore` traits over PostgreSQL or memory
//! - **Models**: Domain models

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod scoring;
pub mod services;
pub mod state;
pub mod utils;

use axum::{http::StatusCode, middleware as axum_middleware, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;

/// Build the application router with all middleware layers
pub fn create_router(state: AppState) -> Router {
    let timeout = state.config().server.request_timeout;

    Router::new()
        .nest("/api/v1", handlers::routes(state.clone()))
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
