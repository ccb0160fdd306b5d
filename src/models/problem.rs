//! Problem model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Problem database model
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Problem {
    pub id: i64,
    pub competition_id: i64,
    /// Display ordinal within the competition
    pub number: i32,
    #[serde(skip_serializing)]
    pub correct_answer: i64,
}

impl Problem {
    /// Check a submitted answer
    pub fn is_correct(&self, answer: i64) -> bool {
        self.correct_answer == answer
    }
}
