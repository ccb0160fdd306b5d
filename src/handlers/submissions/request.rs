//! Submission request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::constants::MAX_USER_ID_LENGTH;

/// Create submission request
///
/// `user_id` is attached by the upstream authentication proxy and treated as
/// an opaque key.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSubmissionRequest {
    #[validate(length(min = 1, max = MAX_USER_ID_LENGTH))]
    pub user_id: String,

    pub problem_id: u64,

    pub answer: i64,

    /// RFC 3339 event time, honoured only when client timestamps are trusted
    #[serde(default)]
    pub timestamp: Option<String>,
}
