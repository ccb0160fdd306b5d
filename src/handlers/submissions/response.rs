//! Submission response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::Submission;

/// A scored submission as stored
#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub id: i64,
    pub user_id: String,
    pub problem_id: i64,
    pub answer: i64,
    pub correct: bool,
    pub score_gained: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Submission> for SubmissionResponse {
    fn from(s: Submission) -> Self {
        Self {
            id: s.id,
            user_id: s.user_id,
            problem_id: s.problem_id,
            answer: s.answer,
            correct: s.correct,
            score_gained: s.score_gained,
            created_at: s.created_at,
        }
    }
}
