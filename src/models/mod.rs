//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod competition;
pub mod problem;
pub mod submission;

pub use competition::*;
pub use problem::*;
pub use submission::*;
