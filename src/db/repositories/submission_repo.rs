//! Submission repository

use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};

use crate::{
    db::store::UserTotal,
    error::AppResult,
    models::{NewSubmission, Submission},
};

/// Repository for submission database operations
pub struct SubmissionRepository;

impl SubmissionRepository {
    /// Insert a scored submission
    pub async fn create(pool: &PgPool, submission: &NewSubmission) -> AppResult<Submission> {
        let submission = sqlx::query_as::<_, Submission>(
            r#"
            INSERT INTO submissions (user_id, problem_id, answer, correct, score_gained, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, problem_id, answer, correct, score_gained, created_at
            "#,
        )
        .bind(&submission.user_id)
        .bind(submission.problem_id)
        .bind(submission.answer)
        .bind(submission.correct)
        .bind(submission.score_gained)
        .bind(submission.created_at)
        .fetch_one(pool)
        .await?;

        Ok(submission)
    }

    /// Check whether a user already solved a problem
    pub async fn exists_correct(pool: &PgPool, user_id: &str, problem_id: i64) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM submissions
                WHERE user_id = $1 AND problem_id = $2 AND correct
            )
            "#,
        )
        .bind(user_id)
        .bind(problem_id)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    /// Timestamp of the earliest correct submission for a problem
    pub async fn first_correct_at(
        pool: &PgPool,
        problem_id: i64,
    ) -> AppResult<Option<DateTime<Utc>>> {
        let first: Option<DateTime<Utc>> = sqlx::query_scalar(
            r#"SELECT MIN(created_at) FROM submissions WHERE problem_id = $1 AND correct"#,
        )
        .bind(problem_id)
        .fetch_one(pool)
        .await?;

        Ok(first)
    }

    /// Count distinct users with a correct submission for a problem
    pub async fn count_solvers(pool: &PgPool, problem_id: i64) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(DISTINCT user_id) FROM submissions WHERE problem_id = $1 AND correct"#,
        )
        .bind(problem_id)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }

    /// Count wrong submissions for a problem up to and including `until`
    pub async fn count_wrong_until(
        pool: &PgPool,
        problem_id: i64,
        until: DateTime<Utc>,
    ) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM submissions
            WHERE problem_id = $1 AND NOT correct AND created_at <= $2
            "#,
        )
        .bind(problem_id)
        .bind(until)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }

    /// Count the distinct problems of a competition a user has solved
    pub async fn count_solved_in_competition(
        pool: &PgPool,
        user_id: &str,
        competition_id: i64,
    ) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(DISTINCT s.problem_id)
            FROM submissions s
            JOIN problems p ON s.problem_id = p.id
            WHERE p.competition_id = $1 AND s.user_id = $2 AND s.correct
            "#,
        )
        .bind(competition_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }

    /// Count users, other than `excluding_user`, who solved every problem
    pub async fn count_clean_sweeps(
        pool: &PgPool,
        competition_id: i64,
        problem_count: i64,
        excluding_user: &str,
    ) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM (
                SELECT s.user_id
                FROM submissions s
                JOIN problems p ON s.problem_id = p.id
                WHERE p.competition_id = $1 AND s.correct AND s.user_id <> $3
                GROUP BY s.user_id
                HAVING COUNT(DISTINCT s.problem_id) = $2
            ) AS swept
            "#,
        )
        .bind(competition_id)
        .bind(problem_count)
        .bind(excluding_user)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }

    /// Sum score deltas per user across a competition
    pub async fn score_totals(pool: &PgPool, competition_id: i64) -> AppResult<Vec<UserTotal>> {
        let totals = sqlx::query_as::<_, UserTotal>(
            r#"
            SELECT s.user_id, SUM(s.score_gained)::BIGINT AS total
            FROM submissions s
            JOIN problems p ON s.problem_id = p.id
            WHERE p.competition_id = $1
            GROUP BY s.user_id
            ORDER BY s.user_id
            "#,
        )
        .bind(competition_id)
        .fetch_all(pool)
        .await?;

        Ok(totals)
    }

    /// List a user's submissions within a competition
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: &str,
        competition_id: i64,
    ) -> AppResult<Vec<Submission>> {
        let submissions = sqlx::query_as::<_, Submission>(
            r#"
            SELECT s.id, s.user_id, s.problem_id, s.answer, s.correct, s.score_gained, s.created_at
            FROM submissions s
            JOIN problems p ON s.problem_id = p.id
            WHERE p.competition_id = $1 AND s.user_id = $2
            ORDER BY s.id
            "#,
        )
        .bind(competition_id)
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(submissions)
    }

    /// Delete every submission
    pub async fn delete_all(conn: &mut PgConnection) -> AppResult<u64> {
        let result = sqlx::query(r#"DELETE FROM submissions"#).execute(conn).await?;

        Ok(result.rows_affected())
    }
}
