//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8081;

/// Default upper bound on handling a single request
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

/// Default time to wait for a pooled connection before giving up
pub const DEFAULT_DATABASE_ACQUIRE_TIMEOUT_SECS: u64 = 5;

/// Storage backends
pub mod backends {
    pub const POSTGRES: &str = "postgres";
    pub const MEMORY: &str = "memory";

    pub const ALL: &[&str] = &[POSTGRES, MEMORY];
}

// =============================================================================
// SCORING
// =============================================================================

pub mod scoring {
    /// Points lost for every wrong answer
    pub const WRONG_ANSWER_PENALTY: i64 = -10;

    /// Points awarded for a repeated correct answer
    pub const RESUBMISSION_SCORE: i64 = 0;

    /// Base points for a first correct answer
    pub const BASE_SCORE: i64 = 20;

    /// Bonus indexed by how many users solved the problem earlier
    pub const SOLVE_ORDER_BONUS: [i64; 10] = [20, 15, 10, 8, 6, 5, 4, 3, 2, 1];

    /// Bonus indexed by how many other users already solved every problem
    pub const CLEAN_SWEEP_BONUS: [i64; 6] = [100, 60, 40, 30, 20, 10];

    /// Points per wrong submission counted before the cutoff
    pub const WRONG_DENSITY_POINTS: i64 = 2;

    /// Points per minute of speed bonus
    pub const SPEED_POINTS_PER_MINUTE: i64 = 1;

    /// The cutoff sits at CUTOFF_NUMERATOR / CUTOFF_DENOMINATOR of the competition
    pub const CUTOFF_NUMERATOR: i32 = 5;
    pub const CUTOFF_DENOMINATOR: i32 = 6;

    /// Leaderboard credit per problem for every participating user
    pub const PARTICIPATION_POINTS_PER_PROBLEM: i64 = 10;
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Maximum length of an opaque user identifier
pub const MAX_USER_ID_LENGTH: u64 = 128;

/// Maximum number of problems accepted when seeding a competition
pub const MAX_PROBLEMS_PER_COMPETITION: u64 = 100;

// =============================================================================
// COMPETITION STATUS
// =============================================================================

/// Competition status values
pub mod competition_status {
    pub const UPCOMING: &str = "upcoming";
    pub const ONGOING: &str = "ongoing";
    pub const ENDED: &str = "ended";
}
