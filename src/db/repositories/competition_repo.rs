//! Competition repository

use sqlx::{PgConnection, PgPool};

use crate::{
    error::AppResult,
    models::{Competition, Problem},
};

/// Repository for competition database operations
pub struct CompetitionRepository;

impl CompetitionRepository {
    /// Create a competition and its problems in one transaction
    pub async fn create_with_problems(
        pool: &PgPool,
        competition: &Competition,
        problems: &[Problem],
    ) -> AppResult<()> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO competitions (id, start_time, end_time)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(competition.id)
        .bind(competition.start_time)
        .bind(competition.end_time)
        .execute(&mut *tx)
        .await?;

        for problem in problems {
            sqlx::query(
                r#"
                INSERT INTO problems (id, competition_id, number, correct_answer)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(problem.id)
            .bind(problem.competition_id)
            .bind(problem.number)
            .bind(problem.correct_answer)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    /// Find competition by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> AppResult<Option<Competition>> {
        let competition = sqlx::query_as::<_, Competition>(
            r#"SELECT id, start_time, end_time FROM competitions WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(competition)
    }

    /// Delete every competition; problems must already be gone
    pub async fn delete_all(conn: &mut PgConnection) -> AppResult<u64> {
        let result = sqlx::query(r#"DELETE FROM competitions"#)
            .execute(conn)
            .await?;

        Ok(result.rows_affected())
    }
}
