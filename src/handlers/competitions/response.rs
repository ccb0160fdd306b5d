//! Competition response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    handlers::submissions::SubmissionResponse,
    models::{CompetitionStatus, Problem},
    services::CompetitionOverview,
};

/// Competition response
#[derive(Debug, Serialize)]
pub struct CompetitionResponse {
    pub id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: CompetitionStatus,
    pub problems: Vec<ProblemSummary>,
}

/// Problem summary; the correct answer is never exposed
#[derive(Debug, Serialize)]
pub struct ProblemSummary {
    pub id: i64,
    pub number: i32,
}

/// Submissions of one user in one competition
#[derive(Debug, Serialize)]
pub struct UserSubmissionsResponse {
    pub competition_id: i64,
    pub user_id: String,
    pub submissions: Vec<SubmissionResponse>,
}

impl From<&Problem> for ProblemSummary {
    fn from(p: &Problem) -> Self {
        Self {
            id: p.id,
            number: p.number,
        }
    }
}

impl From<CompetitionOverview> for CompetitionResponse {
    fn from(overview: CompetitionOverview) -> Self {
        Self {
            id: overview.competition.id,
            start_time: overview.competition.start_time,
            end_time: overview.competition.end_time,
            status: overview.status,
            problems: overview.problems.iter().map(ProblemSummary::from).collect(),
        }
    }
}
