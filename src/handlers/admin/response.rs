//! Admin response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Created competition response
#[derive(Debug, Serialize)]
pub struct CreatedCompetitionResponse {
    pub id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub problem_count: usize,
}

/// Generic acknowledgement
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
