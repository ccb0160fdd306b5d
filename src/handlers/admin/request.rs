//! Admin request DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::MAX_PROBLEMS_PER_COMPETITION;

/// Create competition request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCompetitionRequest {
    pub id: u64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,

    #[validate(length(min = 1, max = MAX_PROBLEMS_PER_COMPETITION))]
    pub problems: Vec<CreateProblemRequest>,
}

/// A problem of a competition being created
#[derive(Debug, Deserialize, Serialize)]
pub struct CreateProblemRequest {
    pub id: u64,
    pub number: i32,
    pub correct_answer: i64,
}
