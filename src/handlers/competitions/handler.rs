//! Competition handler implementations

use std::collections::BTreeMap;

use axum::{extract::State, Json};

use crate::{error::AppResult, extractors::AppPath, state::AppState};

use super::response::{CompetitionResponse, UserSubmissionsResponse};

/// Get a competition with its status and problems
pub async fn get_competition(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<CompetitionResponse>> {
    let overview = state.competitions().get_competition(id).await?;
    Ok(Json(overview.into()))
}

/// Live leaderboard as a `user_id -> total` object
pub async fn get_leaderboard(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<BTreeMap<String, i64>>> {
    let board = state.leaderboard().leaderboard(id).await?;
    Ok(Json(board))
}

/// A user's scored submissions in a competition
pub async fn list_user_submissions(
    State(state): State<AppState>,
    AppPath((id, user_id)): AppPath<(i64, String)>,
) -> AppResult<Json<UserSubmissionsResponse>> {
    let submissions = state.competitions().user_submissions(id, &user_id).await?;

    Ok(Json(UserSubmissionsResponse {
        competition_id: id,
        user_id,
        submissions: submissions.into_iter().map(Into::into).collect(),
    }))
}
