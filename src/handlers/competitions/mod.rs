//! Competition handlers

mod handler;
pub mod response;

pub use handler::*;
pub use response::*;

use axum::{routing::get, Router};

use crate::state::AppState;

/// Competition routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(handler::get_competition))
        .route("/{id}/leaderboard", get(handler::get_leaderboard))
        .route(
            "/{id}/users/{user_id}/submissions",
            get(handler::list_user_submissions),
        )
}
