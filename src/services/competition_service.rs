//! Competition lookups

use std::sync::Arc;

use crate::{
    db::{Catalog, EventStore},
    error::{AppError, AppResult},
    models::{Competition, CompetitionStatus, Problem, Submission},
    scoring::Clock,
};

/// A competition together with its problems and current status
#[derive(Debug, Clone)]
pub struct CompetitionOverview {
    pub competition: Competition,
    pub status: CompetitionStatus,
    pub problems: Vec<Problem>,
}

/// Read-only access to competitions and per-user history
pub struct CompetitionService {
    catalog: Arc<dyn Catalog>,
    events: Arc<dyn EventStore>,
    clock: Arc<dyn Clock>,
}

impl CompetitionService {
    pub fn new(catalog: Arc<dyn Catalog>, events: Arc<dyn EventStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            catalog,
            events,
            clock,
        }
    }

    /// Get a competition with its problems ordered by number
    pub async fn get_competition(&self, competition_id: i64) -> AppResult<CompetitionOverview> {
        let competition = self.find(competition_id).await?;
        let problems = self.catalog.list_problems(competition_id).await?;

        Ok(CompetitionOverview {
            status: competition.status_at(self.clock.now()),
            competition,
            problems,
        })
    }

    /// Submissions of one user within a competition, in commit order
    pub async fn user_submissions(
        &self,
        competition_id: i64,
        user_id: &str,
    ) -> AppResult<Vec<Submission>> {
        self.find(competition_id).await?;
        self.events.list_for_user(user_id, competition_id).await
    }

    async fn find(&self, competition_id: i64) -> AppResult<Competition> {
        self.catalog
            .find_competition(competition_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Competition does not exist".to_string()))
    }
}
