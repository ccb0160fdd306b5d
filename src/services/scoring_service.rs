//! Scoring service
//!
//! Turns a submission event into a scored, committed submission. Reads and the
//! final append for one problem run under that problem's lock; first-time
//! correct answers additionally take the competition lock so clean-sweep ranks
//! are claimed one at a time.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::{
    constants::scoring::{RESUBMISSION_SCORE, WRONG_ANSWER_PENALTY},
    db::{Catalog, EventStore},
    error::{AppError, AppResult},
    models::{Competition, NewSubmission, Problem, Submission},
    scoring::{rules, Clock, ScoringLocks},
    utils::parse_datetime,
};

/// An inbound submission from an authenticated user
#[derive(Debug, Clone)]
pub struct SubmissionEvent {
    pub user_id: String,
    pub problem_id: i64,
    pub answer: i64,
    /// RFC 3339; only honoured when client timestamps are trusted
    pub timestamp: Option<String>,
}

/// Scoring service for submissions
pub struct ScoringService {
    catalog: Arc<dyn Catalog>,
    events: Arc<dyn EventStore>,
    clock: Arc<dyn Clock>,
    locks: Arc<ScoringLocks>,
    trust_client_timestamps: bool,
}

impl ScoringService {
    pub fn new(
        catalog: Arc<dyn Catalog>,
        events: Arc<dyn EventStore>,
        clock: Arc<dyn Clock>,
        trust_client_timestamps: bool,
    ) -> Self {
        Self {
            catalog,
            events,
            clock,
            locks: Arc::new(ScoringLocks::new()),
            trust_client_timestamps,
        }
    }

    /// Lock registry shared with maintenance operations
    pub fn locks(&self) -> Arc<ScoringLocks> {
        self.locks.clone()
    }

    /// Score a submission and append it to the event store
    pub async fn score(&self, event: SubmissionEvent) -> AppResult<Submission> {
        let problem = self
            .catalog
            .find_problem(event.problem_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Problem does not exist".to_string()))?;

        let competition = self
            .catalog
            .find_competition(problem.competition_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Competition does not exist".to_string()))?;

        let at = self.effective_time(event.timestamp.as_deref());
        if !competition.is_active_at(at) {
            warn!(
                user_id = %event.user_id,
                problem_id = problem.id,
                competition_id = competition.id,
                at = %at,
                "Rejected submission outside competition window"
            );
            return Err(AppError::OutOfWindow(
                "Competition is not currently active".to_string(),
            ));
        }

        let _problem_guard = self.locks.problems.acquire(problem.id).await;

        if !problem.is_correct(event.answer) {
            return self
                .commit(&event, &problem, false, WRONG_ANSWER_PENALTY, at)
                .await;
        }

        if self.events.has_solved(&event.user_id, problem.id).await? {
            debug!(user_id = %event.user_id, problem_id = problem.id, "Problem already solved");
            return self
                .commit(&event, &problem, true, RESUBMISSION_SCORE, at)
                .await;
        }

        let prior_solvers = self.events.count_solvers(problem.id).await?;
        let first_correct_at = self.events.first_correct_at(problem.id).await?;
        let until = rules::evaluation_cutoff(&competition, first_correct_at);
        let wrong_before_cutoff = self.events.count_wrong_until(problem.id, until).await?;

        let mut breakdown = rules::first_solve_breakdown(
            &competition,
            at,
            prior_solvers,
            first_correct_at,
            wrong_before_cutoff,
        );

        let _competition_guard = self.locks.competitions.acquire(competition.id).await;

        if let Some(rank) = self.sweep_rank(&event.user_id, &competition).await? {
            breakdown.clean_sweep = rules::clean_sweep_bonus(rank);
            info!(
                user_id = %event.user_id,
                competition_id = competition.id,
                sweep_rank = rank,
                bonus = breakdown.clean_sweep,
                "Clean sweep completed"
            );
        }

        debug!(
            user_id = %event.user_id,
            problem_id = problem.id,
            prior_solvers,
            wrong_before_cutoff,
            ?breakdown,
            "Scored first correct answer"
        );

        self.commit(&event, &problem, true, breakdown.total(), at)
            .await
    }

    /// Rank among clean sweepers if this correct answer completes the competition.
    ///
    /// Caller holds the competition lock and has checked that the user had not
    /// solved the current problem yet.
    async fn sweep_rank(&self, user_id: &str, competition: &Competition) -> AppResult<Option<i64>> {
        let problem_count = self.catalog.count_problems(competition.id).await?;
        let solved = self
            .events
            .count_solved_in_competition(user_id, competition.id)
            .await?;

        if solved + 1 < problem_count {
            return Ok(None);
        }

        let rank = self
            .events
            .count_clean_sweeps(competition.id, problem_count, user_id)
            .await?;

        Ok(Some(rank))
    }

    async fn commit(
        &self,
        event: &SubmissionEvent,
        problem: &Problem,
        correct: bool,
        score_gained: i64,
        at: DateTime<Utc>,
    ) -> AppResult<Submission> {
        let submission = self
            .events
            .append(NewSubmission {
                user_id: event.user_id.clone(),
                problem_id: problem.id,
                answer: event.answer,
                correct,
                score_gained,
                created_at: at,
            })
            .await?;

        info!(
            submission_id = submission.id,
            user_id = %submission.user_id,
            problem_id = submission.problem_id,
            competition_id = problem.competition_id,
            correct,
            score_gained,
            "Submission scored"
        );

        Ok(submission)
    }

    fn effective_time(&self, requested: Option<&str>) -> DateTime<Utc> {
        if self.trust_client_timestamps {
            if let Some(at) = requested.and_then(parse_datetime) {
                return at;
            }
        }
        self.clock.now()
    }
}
