use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::api::models::ApiResponse;

pub type DashResult<T> = Result<T, DashError>;

/// Errors surfaced at the HTTP boundary. Field-level normalization problems
/// never reach this type; they degrade to empty lists or missing values.
#[derive(Debug, Error)]
pub enum DashError {
    #[error("movie store unavailable: {0}")]
    Store(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl DashError {
    /// Wrap a fetch failure, keeping the whole context chain in the message.
    pub fn store(err: &anyhow::Error) -> Self {
        Self::Store(format!("{err:#}"))
    }
}

impl ResponseError for DashError {
    fn status_code(&self) -> StatusCode {
        match self {
            DashError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
            DashError::NotFound(_) => StatusCode::NOT_FOUND,
            DashError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ApiResponse::<()>::error(self.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_variants_to_status_codes() {
        assert_eq!(
            DashError::Store("down".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            DashError::NotFound("Heat".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            DashError::InvalidRequest("limit".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn store_error_keeps_context_chain() {
        let err = anyhow::anyhow!("connection refused").context("fetching movies2");
        let mapped = DashError::store(&err);
        assert_eq!(
            mapped.to_string(),
            "movie store unavailable: fetching movies2: connection refused"
        );
    }
}
