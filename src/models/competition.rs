//! Competition model

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::constants::{
    competition_status,
    scoring::{CUTOFF_DENOMINATOR, CUTOFF_NUMERATOR},
};

/// Competition database model
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Competition {
    pub id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl Competition {
    /// Total length of the competition
    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }

    /// Whether `at` falls inside the competition window (both bounds inclusive)
    pub fn is_active_at(&self, at: DateTime<Utc>) -> bool {
        at >= self.start_time && at <= self.end_time
    }

    /// Latest point at which wrong submissions still count towards the density bonus
    pub fn density_cutoff(&self) -> DateTime<Utc> {
        self.start_time + self.duration() * CUTOFF_NUMERATOR / CUTOFF_DENOMINATOR
    }

    /// Status of the competition at the given instant
    pub fn status_at(&self, at: DateTime<Utc>) -> CompetitionStatus {
        if at < self.start_time {
            CompetitionStatus::Upcoming
        } else if at <= self.end_time {
            CompetitionStatus::Ongoing
        } else {
            CompetitionStatus::Ended
        }
    }
}

/// Competition status enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompetitionStatus {
    Upcoming,
    Ongoing,
    Ended,
}

impl std::fmt::Display for CompetitionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Upcoming => write!(f, "{}", competition_status::UPCOMING),
            Self::Ongoing => write!(f, "{}", competition_status::ONGOING),
            Self::Ended => write!(f, "{}", competition_status::ENDED),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn one_hour() -> Competition {
        let start = Utc.with_ymd_and_hms(2023, 7, 2, 12, 0, 0).unwrap();
        Competition {
            id: 1234,
            start_time: start,
            end_time: start + Duration::hours(1),
        }
    }

    #[test]
    fn test_density_cutoff_is_five_sixths_in() {
        let competition = one_hour();
        assert_eq!(
            competition.density_cutoff(),
            competition.start_time + Duration::minutes(50)
        );
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let competition = one_hour();
        assert!(competition.is_active_at(competition.start_time));
        assert!(competition.is_active_at(competition.end_time));
        assert!(!competition.is_active_at(competition.start_time - Duration::seconds(1)));
        assert!(!competition.is_active_at(competition.end_time + Duration::seconds(1)));
    }

    #[test]
    fn test_status() {
        let competition = one_hour();
        assert_eq!(
            competition.status_at(competition.start_time - Duration::minutes(1)),
            CompetitionStatus::Upcoming
        );
        assert_eq!(
            competition.status_at(competition.start_time + Duration::minutes(30)),
            CompetitionStatus::Ongoing
        );
        assert_eq!(
            competition.status_at(competition.end_time + Duration::minutes(1)),
            CompetitionStatus::Ended
        );
        assert_eq!(CompetitionStatus::Ongoing.to_string(), "ongoing");
    }
}
