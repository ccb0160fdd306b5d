//! Problem repository

use sqlx::{PgConnection, PgPool};

use crate::{error::AppResult, models::Problem};

/// Repository for problem database operations
pub struct ProblemRepository;

impl ProblemRepository {
    /// Find problem by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> AppResult<Option<Problem>> {
        let problem = sqlx::query_as::<_, Problem>(
            r#"
            SELECT id, competition_id, number, correct_answer
            FROM problems
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(problem)
    }

    /// List the problems of a competition
    pub async fn list_by_competition(pool: &PgPool, competition_id: i64) -> AppResult<Vec<Problem>> {
        let problems = sqlx::query_as::<_, Problem>(
            r#"
            SELECT id, competition_id, number, correct_answer
            FROM problems
            WHERE competition_id = $1
            ORDER BY number, id
            "#,
        )
        .bind(competition_id)
        .fetch_all(pool)
        .await?;

        Ok(problems)
    }

    /// Count the problems of a competition
    pub async fn count_by_competition(pool: &PgPool, competition_id: i64) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM problems WHERE competition_id = $1"#,
        )
        .bind(competition_id)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }

    /// Delete every problem; submissions must already be gone
    pub async fn delete_all(conn: &mut PgConnection) -> AppResult<u64> {
        let result = sqlx::query(r#"DELETE FROM problems"#).execute(conn).await?;

        Ok(result.rows_affected())
    }
}
