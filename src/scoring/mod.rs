//! Scoring engine building blocks
//!
//! `rules` holds the point formula, `locks` the per-problem and per-competition
//! serialization, `clock` the injectable time source.

pub mod clock;
pub mod locks;
pub mod rules;

pub use clock::{Clock, FixedClock, SystemClock};
pub use locks::{KeyedLocks, ScoringLocks};
pub use rules::ScoreBreakdown;
