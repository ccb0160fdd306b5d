//! JSON body extractor for submission and admin payloads

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::AppError;

/// Request body parsed as JSON.
///
/// Syntax errors, wrong field types, a missing content type and out-of-range
/// numbers (a negative `problem_id`) all surface as `INVALID_INPUT`, so a
/// rejected submission never reaches the scoring engine.
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(payload)) => Ok(AppJson(payload)),
            Err(rejection) => {
                debug!(status = rejection.status().as_u16(), "Rejected request body");
                Err(AppError::InvalidInput(rejection.body_text()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::header::CONTENT_TYPE};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        problem_id: u64,
    }

    async fn extract(content_type: &str, body: &'static str) -> Result<AppJson<Payload>, AppError> {
        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/")
            .header(CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap();
        AppJson::<Payload>::from_request(request, &()).await
    }

    #[tokio::test]
    async fn test_parses_valid_body() {
        let AppJson(payload) = extract("application/json", r#"{"problem_id": 3}"#)
            .await
            .unwrap();
        assert_eq!(payload.problem_id, 3);
    }

    #[tokio::test]
    async fn test_rejections_are_invalid_input() {
        for (content_type, body) in [
            ("application/json", r#"{"problem_id": -1}"#),
            ("application/json", r#"{"problem_id": "#),
            ("application/json", r#"{}"#),
            ("text/plain", r#"{"problem_id": 3}"#),
        ] {
            let err = extract(content_type, body).await.err().unwrap();
            assert_eq!(err.error_code(), "INVALID_INPUT", "{body}");
        }
    }
}
