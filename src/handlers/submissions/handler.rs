//! Submission handler implementations

use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    extractors::AppJson,
    services::SubmissionEvent,
    state::AppState,
};

use super::{request::CreateSubmissionRequest, response::SubmissionResponse};

/// Score a submission
pub async fn create_submission(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateSubmissionRequest>,
) -> AppResult<Json<SubmissionResponse>> {
    payload.validate()?;

    let problem_id = i64::try_from(payload.problem_id)
        .map_err(|_| AppError::InvalidInput("problem_id is out of range".to_string()))?;

    let submission = state
        .scoring()
        .score(SubmissionEvent {
            user_id: payload.user_id,
            problem_id,
            answer: payload.answer,
            timestamp: payload.timestamp,
        })
        .await?;

    Ok(Json(submission.into()))
}
