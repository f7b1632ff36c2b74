use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ServiceError {
    #[error("Could not fetch tasks from backend")]
    BackendUnavailable,

    #[error("backend request failed: {0}")]
    BackendRequest(String),

    #[error("Task with id {0} not found")]
    NotFound(i64),

    #[error("Task has no description")]
    EmptyDescription,

    #[error("Task has no creation time")]
    MissingCreationTime,

    #[error("invalid creation time '{0}'")]
    InvalidCreationTime(String),

    #[error("{0}")]
    Unexpected(String),
}

impl ServiceError {
    /// Converts to an HTTP error. `context` prefixes the detail of failures
    /// that have no dedicated status.
    pub fn into_api(self, context: &str) -> ApiError {
        match self {
            ServiceError::BackendUnavailable => {
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, &self.to_string())
            }
            ServiceError::NotFound(_) => ApiError::new(StatusCode::NOT_FOUND, &self.to_string()),
            ServiceError::EmptyDescription | ServiceError::MissingCreationTime => {
                ApiError::new(StatusCode::BAD_REQUEST, &self.to_string())
            }
            other => ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                &format!("{}: {}", context, other),
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: &str) -> Self {
        Self {
            status,
            detail: detail.to_string(),
        }
    }

    pub fn validation(detail: &str) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, detail)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = self.status.as_u16(), "{}", self.detail);
        }
        (self.status, Json(json!({"detail": self.detail}))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ServiceError::BackendUnavailable, 500, "Could not fetch tasks from backend")]
    #[case(ServiceError::NotFound(7), 404, "Task with id 7 not found")]
    #[case(ServiceError::EmptyDescription, 400, "Task has no description")]
    #[case(ServiceError::MissingCreationTime, 400, "Task has no creation time")]
    #[case(
        ServiceError::BackendRequest("connection refused".to_string()),
        500,
        "Forecast error: backend request failed: connection refused"
    )]
    #[case(ServiceError::Unexpected("boom".to_string()), 500, "Forecast error: boom")]
    fn maps_service_errors_to_status_and_detail(
        #[case] err: ServiceError,
        #[case] status: u16,
        #[case] detail: &str,
    ) {
        let api = err.into_api("Forecast error");
        assert_eq!(api.status.as_u16(), status);
        assert_eq!(api.detail, detail);
    }

    #[test]
    fn invalid_timestamp_carries_context() {
        let api = ServiceError::InvalidCreationTime("yesterday".to_string())
            .into_api("Active time calculation error");
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            api.detail,
            "Active time calculation error: invalid creation time 'yesterday'"
        );
    }
}
