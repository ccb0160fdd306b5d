//! PostgreSQL-backed catalog and event store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;

use crate::{
    db::{
        repositories::{CompetitionRepository, ProblemRepository, SubmissionRepository},
        store::{Catalog, EventStore, Maintenance, UserTotal},
    },
    error::AppResult,
    models::{Competition, NewSubmission, Problem, Submission},
};

/// Store backed by a PostgreSQL pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Catalog for PgStore {
    async fn find_problem(&self, id: i64) -> AppResult<Option<Problem>> {
        ProblemRepository::find_by_id(&self.pool, id).await
    }

    async fn find_competition(&self, id: i64) -> AppResult<Option<Competition>> {
        CompetitionRepository::find_by_id(&self.pool, id).await
    }

    async fn list_problems(&self, competition_id: i64) -> AppResult<Vec<Problem>> {
        ProblemRepository::list_by_competition(&self.pool, competition_id).await
    }

    async fn count_problems(&self, competition_id: i64) -> AppResult<i64> {
        ProblemRepository::count_by_competition(&self.pool, competition_id).await
    }

    async fn create_competition(
        &self,
        competition: Competition,
        problems: Vec<Problem>,
    ) -> AppResult<()> {
        CompetitionRepository::create_with_problems(&self.pool, &competition, &problems).await
    }
}

#[async_trait]
impl EventStore for PgStore {
    async fn append(&self, submission: NewSubmission) -> AppResult<Submission> {
        SubmissionRepository::create(&self.pool, &submission).await
    }

    async fn has_solved(&self, user_id: &str, problem_id: i64) -> AppResult<bool> {
        SubmissionRepository::exists_correct(&self.pool, user_id, problem_id).await
    }

    async fn first_correct_at(&self, problem_id: i64) -> AppResult<Option<DateTime<Utc>>> {
        SubmissionRepository::first_correct_at(&self.pool, problem_id).await
    }

    async fn count_solvers(&self, problem_id: i64) -> AppResult<i64> {
        SubmissionRepository::count_solvers(&self.pool, problem_id).await
    }

    async fn count_wrong_until(&self, problem_id: i64, until: DateTime<Utc>) -> AppResult<i64> {
        SubmissionRepository::count_wrong_until(&self.pool, problem_id, until).await
    }

    async fn count_solved_in_competition(
        &self,
        user_id: &str,
        competition_id: i64,
    ) -> AppResult<i64> {
        SubmissionRepository::count_solved_in_competition(&self.pool, user_id, competition_id).await
    }

    async fn count_clean_sweeps(
        &self,
        competition_id: i64,
        problem_count: i64,
        excluding_user: &str,
    ) -> AppResult<i64> {
        SubmissionRepository::count_clean_sweeps(
            &self.pool,
            competition_id,
            problem_count,
            excluding_user,
        )
        .await
    }

    async fn score_totals(&self, competition_id: i64) -> AppResult<Vec<UserTotal>> {
        SubmissionRepository::score_totals(&self.pool, competition_id).await
    }

    async fn list_for_user(
        &self,
        user_id: &str,
        competition_id: i64,
    ) -> AppResult<Vec<Submission>> {
        SubmissionRepository::list_for_user(&self.pool, user_id, competition_id).await
    }
}

#[async_trait]
impl Maintenance for PgStore {
    async fn reset_all(&self) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        // Concurrent appends wait for the commit
        sqlx::query(r#"LOCK TABLE competitions, problems, submissions IN ACCESS EXCLUSIVE MODE"#)
            .execute(&mut *tx)
            .await?;

        let submissions = SubmissionRepository::delete_all(&mut *tx).await?;
        let problems = ProblemRepository::delete_all(&mut *tx).await?;
        let competitions = CompetitionRepository::delete_all(&mut *tx).await?;

        tx.commit().await?;

        debug!(submissions, problems, competitions, "Deleted all competition data");
        Ok(())
    }
}
