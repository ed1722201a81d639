use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::DomainError;
use serde_json::json;

/// HTTP-facing error: maps the domain taxonomy onto status codes.
/// No failure is retried; everything surfaces synchronously to the caller.
#[derive(Debug)]
pub enum ApiError {
    Domain(DomainError),
    BadRequest(String),
    Internal(String),
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self::Domain(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Domain(e) => {
                let status = match &e {
                    DomainError::MissingField(_) | DomainError::InvalidValue(_) => {
                        StatusCode::BAD_REQUEST
                    }
                    DomainError::NotFound(_) => StatusCode::NOT_FOUND,
                    DomainError::Conflict(_) => StatusCode::CONFLICT,
                    DomainError::BatchFailed { .. } | DomainError::Storage(_) => {
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                (status, e.to_string())
            }
            Self::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
            Self::Internal(m) => (StatusCode::INTERNAL_SERVER_ERROR, m),
        };

        if status.is_server_error() {
            tracing::error!(%status, "{message}");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(e: DomainError) -> StatusCode {
        ApiError::from(e).into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_of(DomainError::MissingField("code".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(DomainError::NotFound("report 9".into())), StatusCode::NOT_FOUND);
        assert_eq!(status_of(DomainError::Conflict("dup".into())), StatusCode::CONFLICT);
        assert_eq!(status_of(DomainError::Storage("down".into())), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            status_of(DomainError::BatchFailed { ship: "TB 01".into(), reason: "dup".into() }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
