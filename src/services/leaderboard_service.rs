//! Leaderboard aggregation

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::{
    constants::scoring::PARTICIPATION_POINTS_PER_PROBLEM,
    db::{Catalog, EventStore},
    error::AppResult,
};

/// Folds the submission history of a competition into per-user totals
pub struct LeaderboardService {
    catalog: Arc<dyn Catalog>,
    events: Arc<dyn EventStore>,
}

impl LeaderboardService {
    pub fn new(catalog: Arc<dyn Catalog>, events: Arc<dyn EventStore>) -> Self {
        Self { catalog, events }
    }

    /// Total score per user who submitted at least once.
    ///
    /// Every listed user also receives a flat participation credit per problem
    /// in the competition. Unknown competitions yield an empty board.
    pub async fn leaderboard(&self, competition_id: i64) -> AppResult<BTreeMap<String, i64>> {
        let problem_count = self.catalog.count_problems(competition_id).await?;
        let participation = PARTICIPATION_POINTS_PER_PROBLEM * problem_count;

        let totals = self.events.score_totals(competition_id).await?;

        Ok(totals
            .into_iter()
            .map(|row| (row.user_id, row.total + participation))
            .collect())
    }
}
