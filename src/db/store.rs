//! Storage seams used by the scoring engine and the leaderboard
//!
//! The catalog is read-mostly (competitions and problems); the event store is the
//! append-only submission log. Every aggregate the engine needs is a query over
//! the log, never a stored counter.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::{
    error::AppResult,
    models::{Competition, NewSubmission, Problem, Submission},
};

/// Sum of score deltas for one user within a competition
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct UserTotal {
    pub user_id: String,
    pub total: i64,
}

/// Competitions and their problems
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn find_problem(&self, id: i64) -> AppResult<Option<Problem>>;

    async fn find_competition(&self, id: i64) -> AppResult<Option<Competition>>;

    /// Problems of a competition ordered by number
    async fn list_problems(&self, competition_id: i64) -> AppResult<Vec<Problem>>;

    async fn count_problems(&self, competition_id: i64) -> AppResult<i64>;

    /// Insert a competition together with its problems, all or nothing
    async fn create_competition(
        &self,
        competition: Competition,
        problems: Vec<Problem>,
    ) -> AppResult<()>;
}

/// Append-only submission log
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Commit a scored submission and assign its id
    async fn append(&self, submission: NewSubmission) -> AppResult<Submission>;

    /// Whether the user already holds a correct submission for the problem
    async fn has_solved(&self, user_id: &str, problem_id: i64) -> AppResult<bool>;

    /// Earliest timestamp among correct submissions for the problem
    async fn first_correct_at(&self, problem_id: i64) -> AppResult<Option<DateTime<Utc>>>;

    /// Number of distinct users with a correct submission for the problem
    async fn count_solvers(&self, problem_id: i64) -> AppResult<i64>;

    /// Wrong submissions for the problem stamped at or before `until`
    async fn count_wrong_until(&self, problem_id: i64, until: DateTime<Utc>) -> AppResult<i64>;

    /// Distinct problems of the competition the user has solved
    async fn count_solved_in_competition(
        &self,
        user_id: &str,
        competition_id: i64,
    ) -> AppResult<i64>;

    /// Users other than `excluding_user` who solved all `problem_count` problems
    async fn count_clean_sweeps(
        &self,
        competition_id: i64,
        problem_count: i64,
        excluding_user: &str,
    ) -> AppResult<i64>;

    /// Per-user score sums over the competition's problems
    async fn score_totals(&self, competition_id: i64) -> AppResult<Vec<UserTotal>>;

    /// Submissions of one user within a competition, oldest first
    async fn list_for_user(&self, user_id: &str, competition_id: i64)
        -> AppResult<Vec<Submission>>;
}

/// Destructive bootstrap operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Maintenance: Send + Sync {
    /// Delete every submission, problem and competition as one step.
    ///
    /// Submissions racing with the reset are either deleted with it or rejected.
    async fn reset_all(&self) -> AppResult<()>;
}
