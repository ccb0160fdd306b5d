//! Scoring rules
//!
//! Pure functions of the submission history aggregates. Nothing here touches
//! storage; the service gathers the inputs under its locks and sums the terms.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    constants::scoring::{
        BASE_SCORE, CLEAN_SWEEP_BONUS, SOLVE_ORDER_BONUS, SPEED_POINTS_PER_MINUTE,
        WRONG_DENSITY_POINTS,
    },
    models::Competition,
    utils::minutes_between,
};

/// Bonus for the solver who arrives after `prior_solvers` others
pub fn solve_order_bonus(prior_solvers: i64) -> i64 {
    usize::try_from(prior_solvers)
        .ok()
        .and_then(|i| SOLVE_ORDER_BONUS.get(i))
        .copied()
        .unwrap_or(0)
}

/// Bonus for completing every problem after `prior_sweepers` other users did
pub fn clean_sweep_bonus(prior_sweepers: i64) -> i64 {
    usize::try_from(prior_sweepers)
        .ok()
        .and_then(|i| CLEAN_SWEEP_BONUS.get(i))
        .copied()
        .unwrap_or(0)
}

/// Cutoff for counting wrong submissions and for the speed bonus.
///
/// The earlier of the first correct solve and the fixed 5/6 mark.
pub fn evaluation_cutoff(
    competition: &Competition,
    first_correct_at: Option<DateTime<Utc>>,
) -> DateTime<Utc> {
    let fixed = competition.density_cutoff();
    match first_correct_at {
        Some(first) if first < fixed => first,
        _ => fixed,
    }
}

pub fn wrong_density_bonus(wrong_before_cutoff: i64) -> i64 {
    WRONG_DENSITY_POINTS * wrong_before_cutoff
}

/// Minutes since start, capped at the minutes from start to the cutoff
pub fn speed_bonus(competition: &Competition, at: DateTime<Utc>, until: DateTime<Utc>) -> i64 {
    let elapsed = minutes_between(competition.start_time, at);
    let window = minutes_between(competition.start_time, until);
    SPEED_POINTS_PER_MINUTE * elapsed.min(window)
}

/// Terms of a first-time correct answer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub base: i64,
    pub solve_order: i64,
    pub wrong_density: i64,
    pub speed: i64,
    pub clean_sweep: i64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> i64 {
        self.base + self.solve_order + self.wrong_density + self.speed + self.clean_sweep
    }
}

/// Score the problem-local terms of a first-time correct answer
pub fn first_solve_breakdown(
    competition: &Competition,
    at: DateTime<Utc>,
    prior_solvers: i64,
    first_correct_at: Option<DateTime<Utc>>,
    wrong_before_cutoff: i64,
) -> ScoreBreakdown {
    let until = evaluation_cutoff(competition, first_correct_at);
    ScoreBreakdown {
        base: BASE_SCORE,
        solve_order: solve_order_bonus(prior_solvers),
        wrong_density: wrong_density_bonus(wrong_before_cutoff),
        speed: speed_bonus(competition, at, until),
        clean_sweep: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn competition() -> Competition {
        let start = Utc.with_ymd_and_hms(2023, 7, 2, 12, 0, 0).unwrap();
        Competition {
            id: 1,
            start_time: start,
            end_time: start + Duration::hours(1),
        }
    }

    #[test]
    fn test_solve_order_bonus_is_non_increasing() {
        let bonuses: Vec<i64> = (0..12).map(solve_order_bonus).collect();
        assert_eq!(bonuses[0], 20);
        assert!(bonuses.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(solve_order_bonus(9), 1);
        assert_eq!(solve_order_bonus(10), 0);
        assert_eq!(solve_order_bonus(1_000), 0);
        assert_eq!(solve_order_bonus(-1), 0);
    }

    #[test]
    fn test_clean_sweep_bonus() {
        assert_eq!(clean_sweep_bonus(0), 100);
        assert_eq!(clean_sweep_bonus(1), 60);
        assert_eq!(clean_sweep_bonus(5), 10);
        assert_eq!(clean_sweep_bonus(6), 0);
    }

    #[test]
    fn test_cutoff_prefers_earlier_first_solve() {
        let competition = competition();
        let fixed = competition.start_time + Duration::minutes(50);
        assert_eq!(evaluation_cutoff(&competition, None), fixed);

        let early = competition.start_time + Duration::minutes(3);
        assert_eq!(evaluation_cutoff(&competition, Some(early)), early);

        let late = competition.start_time + Duration::minutes(55);
        assert_eq!(evaluation_cutoff(&competition, Some(late)), fixed);
    }

    #[test]
    fn test_speed_bonus_is_capped_by_cutoff() {
        let competition = competition();
        let start = competition.start_time;
        let fixed = competition.density_cutoff();

        assert_eq!(speed_bonus(&competition, start, fixed), 0);
        assert_eq!(speed_bonus(&competition, start + Duration::seconds(70), fixed), 1);
        assert_eq!(speed_bonus(&competition, start + Duration::minutes(55), fixed), 50);
        assert_eq!(
            speed_bonus(
                &competition,
                start + Duration::minutes(30),
                start + Duration::seconds(10)
            ),
            0
        );
    }

    #[test]
    fn test_first_blood_at_start_is_forty() {
        let competition = competition();
        let breakdown =
            first_solve_breakdown(&competition, competition.start_time, 0, None, 0);
        assert_eq!(breakdown.total(), 40);
    }

    #[test]
    fn test_breakdown_with_wrong_answers() {
        let competition = competition();
        let at = competition.start_time + Duration::minutes(30) + Duration::seconds(10);
        let breakdown = first_solve_breakdown(&competition, at, 0, None, 2);
        assert_eq!(breakdown.wrong_density, 4);
        assert_eq!(breakdown.speed, 30);
        assert_eq!(breakdown.total(), 74);
    }
}
