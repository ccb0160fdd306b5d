//! Submission model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Submission database model
///
/// Rows are append-only: a corrected answer is a new submission.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Submission {
    pub id: i64,
    pub user_id: String,
    pub problem_id: i64,
    pub answer: i64,
    pub correct: bool,
    pub score_gained: i64,
    pub created_at: DateTime<Utc>,
}

/// A scored submission that has not been committed yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubmission {
    pub user_id: String,
    pub problem_id: i64,
    pub answer: i64,
    pub correct: bool,
    pub score_gained: i64,
    pub created_at: DateTime<Utc>,
}

impl NewSubmission {
    /// Attach the identifier assigned by the store
    pub fn into_submission(self, id: i64) -> Submission {
        Submission {
            id,
            user_id: self.user_id,
            problem_id: self.problem_id,
            answer: self.answer,
            correct: self.correct,
            score_gained: self.score_gained,
            created_at: self.created_at,
        }
    }
}
