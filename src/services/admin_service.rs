//! Admin service
//!
//! Bootstrap operations: wiping all data and seeding competitions.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    constants::MAX_PROBLEMS_PER_COMPETITION,
    db::{Catalog, Maintenance},
    error::{AppError, AppResult},
    models::{Competition, Problem},
    scoring::ScoringLocks,
};

/// Admin service for system management
pub struct AdminService {
    catalog: Arc<dyn Catalog>,
    maintenance: Arc<dyn Maintenance>,
    locks: Arc<ScoringLocks>,
}

impl AdminService {
    pub fn new(
        catalog: Arc<dyn Catalog>,
        maintenance: Arc<dyn Maintenance>,
        locks: Arc<ScoringLocks>,
    ) -> Self {
        Self {
            catalog,
            maintenance,
            locks,
        }
    }

    /// Delete all submissions, problems and competitions
    pub async fn reset(&self) -> AppResult<()> {
        warn!("Resetting all competition data");
        self.maintenance.reset_all().await?;
        self.locks.evict_idle();
        Ok(())
    }

    /// Create a competition together with its problems
    pub async fn create_competition(
        &self,
        competition: Competition,
        problems: Vec<Problem>,
    ) -> AppResult<Competition> {
        validate_competition(&competition, &problems)?;

        let problem_count = problems.len();
        self.catalog
            .create_competition(competition.clone(), problems)
            .await?;

        info!(
            competition_id = competition.id,
            start_time = %competition.start_time,
            end_time = %competition.end_time,
            problem_count,
            "Competition created"
        );

        Ok(competition)
    }
}

fn validate_competition(competition: &Competition, problems: &[Problem]) -> AppResult<()> {
    if competition.start_time >= competition.end_time {
        return Err(AppError::Validation(
            "Competition start must be before its end".to_string(),
        ));
    }

    if problems.is_empty() {
        return Err(AppError::Validation(
            "Competition needs at least one problem".to_string(),
        ));
    }

    if problems.len() as u64 > MAX_PROBLEMS_PER_COMPETITION {
        return Err(AppError::Validation(format!(
            "At most {} problems per competition",
            MAX_PROBLEMS_PER_COMPETITION
        )));
    }

    let mut ids = HashSet::new();
    for problem in problems {
        if problem.competition_id != competition.id {
            return Err(AppError::Validation(format!(
                "Problem {} belongs to another competition",
                problem.id
            )));
        }
        if !ids.insert(problem.id) {
            return Err(AppError::Validation(format!(
                "Duplicate problem id {}",
                problem.id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{store::MockMaintenance, EventStore, MemoryStore};
    use crate::models::NewSubmission;
    use crate::scoring::FixedClock;
    use crate::services::{ScoringService, SubmissionEvent};
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 7, 2, 12, 0, 0).unwrap()
    }

    fn competition(id: i64, hours: i64) -> Competition {
        Competition {
            id,
            start_time: start(),
            end_time: start() + Duration::hours(hours),
        }
    }

    fn problem(id: i64, competition_id: i64) -> Problem {
        Problem {
            id,
            competition_id,
            number: id as i32,
            correct_answer: id,
        }
    }

    #[tokio::test]
    async fn test_create_competition() {
        let store = Arc::new(MemoryStore::new());
        let admin = AdminService::new(store.clone(), store.clone(), Arc::new(ScoringLocks::new()));

        admin
            .create_competition(competition(1, 1), vec![problem(1, 1), problem(2, 1)])
            .await
            .unwrap();

        assert_eq!(store.count_problems(1).await.unwrap(), 2);
        assert!(store.find_competition(1).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_rejects_invalid_competitions() {
        let store = Arc::new(MemoryStore::new());
        let admin = AdminService::new(store.clone(), store.clone(), Arc::new(ScoringLocks::new()));

        let cases = vec![
            (competition(1, 0), vec![problem(1, 1)]),
            (competition(1, -1), vec![problem(1, 1)]),
            (competition(1, 1), vec![]),
            (competition(1, 1), vec![problem(1, 2)]),
            (competition(1, 1), vec![problem(1, 1), problem(1, 1)]),
        ];
        for (c, p) in cases {
            let err = admin.create_competition(c, p).await.unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
        assert!(store.find_competition(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_reset_clears_everything() {
        let store = Arc::new(MemoryStore::new());
        let admin = AdminService::new(store.clone(), store.clone(), Arc::new(ScoringLocks::new()));
        admin
            .create_competition(competition(1, 1), vec![problem(1, 1)])
            .await
            .unwrap();
        store
            .append(NewSubmission {
                user_id: "a".to_string(),
                problem_id: 1,
                answer: 1,
                correct: true,
                score_gained: 40,
                created_at: start(),
            })
            .await
            .unwrap();

        admin.reset().await.unwrap();

        assert_eq!(store.submission_count().await, 0);
        assert!(store.find_problem(1).await.unwrap().is_none());
        assert!(store.find_competition(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_reset_releases_idle_locks() {
        let store = Arc::new(MemoryStore::new());
        let scoring = ScoringService::new(
            store.clone(),
            store.clone(),
            Arc::new(FixedClock(start())),
            true,
        );
        let admin = AdminService::new(store.clone(), store.clone(), scoring.locks());
        admin
            .create_competition(competition(1, 1), vec![problem(1, 1)])
            .await
            .unwrap();

        scoring
            .score(SubmissionEvent {
                user_id: "a".to_string(),
                problem_id: 1,
                answer: 1,
                timestamp: None,
            })
            .await
            .unwrap();
        assert_eq!(scoring.locks().problems.len(), 1);
        assert_eq!(scoring.locks().competitions.len(), 1);

        admin.reset().await.unwrap();

        assert!(scoring.locks().problems.is_empty());
        assert!(scoring.locks().competitions.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_reset_is_atomic_under_concurrent_submissions() {
        let store = Arc::new(MemoryStore::new());
        let scoring = Arc::new(ScoringService::new(
            store.clone(),
            store.clone(),
            Arc::new(FixedClock(start())),
            true,
        ));
        let admin = AdminService::new(store.clone(), store.clone(), scoring.locks());
        admin
            .create_competition(
                competition(1, 1),
                (1..=3).map(|i| problem(i, 1)).collect(),
            )
            .await
            .unwrap();

        let submitters: Vec<_> = (0..20)
            .map(|i| {
                let scoring = scoring.clone();
                tokio::spawn(async move {
                    // Problems may vanish mid-flight; only the reset result matters here
                    let _ = scoring
                        .score(SubmissionEvent {
                            user_id: format!("u{i}"),
                            problem_id: i % 3 + 1,
                            answer: 0,
                            timestamp: None,
                        })
                        .await;
                })
            })
            .collect();

        admin.reset().await.unwrap();
        for task in submitters {
            task.await.unwrap();
        }

        // Appends racing the reset are either wiped with it or rejected
        assert_eq!(store.submission_count().await, 0);
        assert!(store.find_problem(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_reset_failure_propagates() {
        let store = Arc::new(MemoryStore::new());
        let mut maintenance = MockMaintenance::new();
        maintenance
            .expect_reset_all()
            .times(1)
            .returning(|| Err(AppError::StorageUnavailable("lock timeout".into())));

        let admin = AdminService::new(store, Arc::new(maintenance), Arc::new(ScoringLocks::new()));

        assert!(admin.reset().await.unwrap_err().is_retryable());
    }
}
