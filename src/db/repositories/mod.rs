//! Database repositories
//!
//! Repositories handle all direct database interactions.

pub mod competition_repo;
pub mod problem_repo;
pub mod submission_repo;

pub use competition_repo::CompetitionRepository;
pub use problem_repo::ProblemRepository;
pub use submission_repo::SubmissionRepository;
