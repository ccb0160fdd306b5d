//! In-memory catalog and event store
//!
//! Mirrors the PostgreSQL queries over plain collections. Used by tests and by
//! `STORE_BACKEND=memory`; nothing survives a restart.

use std::collections::{BTreeMap, HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::{
    db::store::{Catalog, EventStore, Maintenance, UserTotal},
    error::{AppError, AppResult},
    models::{Competition, NewSubmission, Problem, Submission},
};

#[derive(Default)]
struct MemoryState {
    competitions: BTreeMap<i64, Competition>,
    problems: BTreeMap<i64, Problem>,
    submissions: Vec<Submission>,
    next_submission_id: i64,
}

impl MemoryState {
    fn competition_of(&self, problem_id: i64) -> Option<i64> {
        self.problems.get(&problem_id).map(|p| p.competition_id)
    }

    fn in_competition<'a>(
        &'a self,
        competition_id: i64,
    ) -> impl Iterator<Item = &'a Submission> + 'a {
        self.submissions
            .iter()
            .filter(move |s| self.competition_of(s.problem_id) == Some(competition_id))
    }

    /// Distinct solved problems per user within a competition
    fn solved_by_user(&self, competition_id: i64) -> HashMap<&str, HashSet<i64>> {
        let mut solved: HashMap<&str, HashSet<i64>> = HashMap::new();
        for submission in self.in_competition(competition_id).filter(|s| s.correct) {
            solved
                .entry(submission.user_id.as_str())
                .or_default()
                .insert(submission.problem_id);
        }
        solved
    }
}

/// Store that keeps everything in process memory
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of committed submissions
    pub async fn submission_count(&self) -> usize {
        self.state.read().await.submissions.len()
    }
}

#[async_trait]
impl Catalog for MemoryStore {
    async fn find_problem(&self, id: i64) -> AppResult<Option<Problem>> {
        Ok(self.state.read().await.problems.get(&id).cloned())
    }

    async fn find_competition(&self, id: i64) -> AppResult<Option<Competition>> {
        Ok(self.state.read().await.competitions.get(&id).cloned())
    }

    async fn list_problems(&self, competition_id: i64) -> AppResult<Vec<Problem>> {
        let state = self.state.read().await;
        let mut problems: Vec<Problem> = state
            .problems
            .values()
            .filter(|p| p.competition_id == competition_id)
            .cloned()
            .collect();
        problems.sort_by_key(|p| (p.number, p.id));
        Ok(problems)
    }

    async fn count_problems(&self, competition_id: i64) -> AppResult<i64> {
        let state = self.state.read().await;
        Ok(state
            .problems
            .values()
            .filter(|p| p.competition_id == competition_id)
            .count() as i64)
    }

    async fn create_competition(
        &self,
        competition: Competition,
        problems: Vec<Problem>,
    ) -> AppResult<()> {
        let mut state = self.state.write().await;

        if state.competitions.contains_key(&competition.id) {
            return Err(AppError::Validation("Resource already exists".to_string()));
        }
        let mut seen = HashSet::new();
        for problem in &problems {
            if state.problems.contains_key(&problem.id) || !seen.insert(problem.id) {
                return Err(AppError::Validation("Resource already exists".to_string()));
            }
            if problem.competition_id != competition.id {
                return Err(AppError::Validation(
                    "Referenced resource does not exist".to_string(),
                ));
            }
        }

        for problem in problems {
            state.problems.insert(problem.id, problem);
        }
        state.competitions.insert(competition.id, competition);

        Ok(())
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn append(&self, submission: NewSubmission) -> AppResult<Submission> {
        let mut state = self.state.write().await;

        if !state.problems.contains_key(&submission.problem_id) {
            return Err(AppError::Validation(
                "Referenced resource does not exist".to_string(),
            ));
        }

        state.next_submission_id += 1;
        let submission = submission.into_submission(state.next_submission_id);
        state.submissions.push(submission.clone());

        Ok(submission)
    }

    async fn has_solved(&self, user_id: &str, problem_id: i64) -> AppResult<bool> {
        let state = self.state.read().await;
        Ok(state
            .submissions
            .iter()
            .any(|s| s.correct && s.problem_id == problem_id && s.user_id == user_id))
    }

    async fn first_correct_at(&self, problem_id: i64) -> AppResult<Option<DateTime<Utc>>> {
        let state = self.state.read().await;
        Ok(state
            .submissions
            .iter()
            .filter(|s| s.correct && s.problem_id == problem_id)
            .map(|s| s.created_at)
            .min())
    }

    async fn count_solvers(&self, problem_id: i64) -> AppResult<i64> {
        let state = self.state.read().await;
        let solvers: HashSet<&str> = state
            .submissions
            .iter()
            .filter(|s| s.correct && s.problem_id == problem_id)
            .map(|s| s.user_id.as_str())
            .collect();
        Ok(solvers.len() as i64)
    }

    async fn count_wrong_until(&self, problem_id: i64, until: DateTime<Utc>) -> AppResult<i64> {
        let state = self.state.read().await;
        Ok(state
            .submissions
            .iter()
            .filter(|s| !s.correct && s.problem_id == problem_id && s.created_at <= until)
            .count() as i64)
    }

    async fn count_solved_in_competition(
        &self,
        user_id: &str,
        competition_id: i64,
    ) -> AppResult<i64> {
        let state = self.state.read().await;
        Ok(state
            .solved_by_user(competition_id)
            .get(user_id)
            .map_or(0, |problems| problems.len() as i64))
    }

    async fn count_clean_sweeps(
        &self,
        competition_id: i64,
        problem_count: i64,
        excluding_user: &str,
    ) -> AppResult<i64> {
        let state = self.state.read().await;
        Ok(state
            .solved_by_user(competition_id)
            .iter()
            .filter(|(user, problems)| {
                **user != excluding_user && problems.len() as i64 == problem_count
            })
            .count() as i64)
    }

    async fn score_totals(&self, competition_id: i64) -> AppResult<Vec<UserTotal>> {
        let state = self.state.read().await;
        let mut totals: BTreeMap<&str, i64> = BTreeMap::new();
        for submission in state.in_competition(competition_id) {
            *totals.entry(submission.user_id.as_str()).or_insert(0) += submission.score_gained;
        }
        Ok(totals
            .into_iter()
            .map(|(user_id, total)| UserTotal {
                user_id: user_id.to_string(),
                total,
            })
            .collect())
    }

    async fn list_for_user(
        &self,
        user_id: &str,
        competition_id: i64,
    ) -> AppResult<Vec<Submission>> {
        let state = self.state.read().await;
        Ok(state
            .in_competition(competition_id)
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl Maintenance for MemoryStore {
    async fn reset_all(&self) -> AppResult<()> {
        let mut state = self.state.write().await;
        state.submissions.clear();
        state.problems.clear();
        state.competitions.clear();
        // Ids keep increasing across resets, like a sequence
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 7, 2, 12, 0, 0).unwrap()
    }

    async fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        seeded_into(&store).await;
        store
    }

    async fn seeded_into(store: &MemoryStore) {
        let competition = Competition {
            id: 7,
            start_time: start(),
            end_time: start() + Duration::hours(1),
        };
        let problems = (1..=2)
            .map(|i| Problem {
                id: i,
                competition_id: 7,
                number: i as i32,
                correct_answer: i,
            })
            .collect();
        store.create_competition(competition, problems).await.unwrap();
    }

    fn entry(user: &str, problem_id: i64, correct: bool, minutes: i64) -> NewSubmission {
        NewSubmission {
            user_id: user.to_string(),
            problem_id,
            answer: 0,
            correct,
            score_gained: if correct { 20 } else { -10 },
            created_at: start() + Duration::minutes(minutes),
        }
    }

    #[tokio::test]
    async fn test_append_assigns_increasing_ids() {
        let store = seeded().await;
        let first = store.append(entry("a", 1, false, 0)).await.unwrap();
        let second = store.append(entry("a", 1, true, 1)).await.unwrap();
        assert!(second.id > first.id);
        assert_eq!(store.submission_count().await, 2);
    }

    #[tokio::test]
    async fn test_append_rejects_unknown_problem() {
        let store = seeded().await;
        assert!(store.append(entry("a", 99, true, 0)).await.is_err());
        assert_eq!(store.submission_count().await, 0);
    }

    #[tokio::test]
    async fn test_aggregates() {
        let store = seeded().await;
        store.append(entry("b", 1, false, 0)).await.unwrap();
        store.append(entry("b", 1, false, 40)).await.unwrap();
        store.append(entry("a", 1, true, 5)).await.unwrap();
        store.append(entry("a", 1, true, 6)).await.unwrap();
        store.append(entry("a", 2, true, 7)).await.unwrap();

        assert!(store.has_solved("a", 1).await.unwrap());
        assert!(!store.has_solved("b", 1).await.unwrap());
        assert_eq!(
            store.first_correct_at(1).await.unwrap(),
            Some(start() + Duration::minutes(5))
        );
        assert_eq!(store.count_solvers(1).await.unwrap(), 1);
        assert_eq!(
            store
                .count_wrong_until(1, start() + Duration::minutes(5))
                .await
                .unwrap(),
            1
        );
        assert_eq!(store.count_solved_in_competition("a", 7).await.unwrap(), 2);
        assert_eq!(store.count_clean_sweeps(7, 2, "b").await.unwrap(), 1);
        assert_eq!(store.count_clean_sweeps(7, 2, "a").await.unwrap(), 0);

        let totals = store.score_totals(7).await.unwrap();
        assert_eq!(
            totals,
            vec![
                UserTotal {
                    user_id: "a".to_string(),
                    total: 60
                },
                UserTotal {
                    user_id: "b".to_string(),
                    total: -20
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_reset_all_with_submissions() {
        let store = seeded().await;
        let before = store.append(entry("a", 1, true, 0)).await.unwrap();

        store.reset_all().await.unwrap();

        assert_eq!(store.submission_count().await, 0);
        assert!(store.find_competition(7).await.unwrap().is_none());
        assert!(store.find_problem(1).await.unwrap().is_none());

        seeded_into(&store).await;
        let after = store.append(entry("a", 1, true, 0)).await.unwrap();
        assert!(after.id > before.id);
    }
}
