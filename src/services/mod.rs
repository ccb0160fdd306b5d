//! Business logic services

pub mod admin_service;
pub mod competition_service;
pub mod leaderboard_service;
pub mod scoring_service;

pub use admin_service::AdminService;
pub use competition_service::{CompetitionOverview, CompetitionService};
pub use leaderboard_service::LeaderboardService;
pub use scoring_service::{ScoringService, SubmissionEvent};
