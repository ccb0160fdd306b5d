//! Admin handler implementations

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    extractors::AppJson,
    models::{Competition, Problem},
    state::AppState,
};

use super::{
    request::CreateCompetitionRequest,
    response::{CreatedCompetitionResponse, MessageResponse},
};

fn to_id(value: u64, field: &str) -> AppResult<i64> {
    i64::try_from(value).map_err(|_| AppError::InvalidInput(format!("{field} is out of range")))
}

/// Delete all submissions, problems and competitions
pub async fn reset(State(state): State<AppState>) -> AppResult<Json<MessageResponse>> {
    state.admin().reset().await?;

    Ok(Json(MessageResponse {
        message: "All competition data deleted".to_string(),
    }))
}

/// Create a competition with its problems
pub async fn create_competition(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateCompetitionRequest>,
) -> AppResult<(StatusCode, Json<CreatedCompetitionResponse>)> {
    payload.validate()?;

    let competition_id = to_id(payload.id, "id")?;
    let problems = payload
        .problems
        .iter()
        .map(|p| -> AppResult<Problem> {
            Ok(Problem {
                id: to_id(p.id, "problems.id")?,
                competition_id,
                number: p.number,
                correct_answer: p.correct_answer,
            })
        })
        .collect::<AppResult<Vec<_>>>()?;
    let problem_count = problems.len();

    let competition = state
        .admin()
        .create_competition(
            Competition {
                id: competition_id,
                start_time: payload.start_time,
                end_time: payload.end_time,
            },
            problems,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedCompetitionResponse {
            id: competition.id,
            start_time: competition.start_time,
            end_time: competition.end_time,
            problem_count,
        }),
    ))
}
