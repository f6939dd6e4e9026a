//! Mapping of pipeline errors onto HTTP responses.

use super::Status;
use crate::error::VidbriefError;
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

/// Error returned by route handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Client sent something unusable (e.g. an index name with a path separator).
    BadRequest(String),
    /// The index, its videos or a prior report do not exist.
    NotFound(String),
    /// The vendor answered with an error or something unexpected.
    BadGateway(String),
    /// Local failure (filesystem, configuration, failed indexing).
    Internal(String),
    /// Chat provider rejection, forwarded verbatim.
    Upstream { status: u16, body: String },
}

impl From<VidbriefError> for ApiError {
    fn from(err: VidbriefError) -> Self {
        match err {
            VidbriefError::InvalidInput(msg) => Self::BadRequest(msg),
            VidbriefError::IndexNotFound(_)
            | VidbriefError::NoVideos(_)
            | VidbriefError::SummaryMissing(_) => Self::NotFound(err.to_string()),
            VidbriefError::Vendor { .. }
            | VidbriefError::VendorResponse(_)
            | VidbriefError::Http(_)
            | VidbriefError::Chat(_) => {
                tracing::error!("Upstream error: {}", err);
                Self::BadGateway(err.to_string())
            }
            _ => {
                tracing::error!("Internal error: {}", err);
                Self::Internal(err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, message),
            Self::BadGateway(message) => (StatusCode::BAD_GATEWAY, message),
            Self::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
            Self::Upstream { status, body } => {
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                let content_type = if serde_json::from_str::<serde_json::Value>(&body).is_ok() {
                    "application/json"
                } else {
                    "text/plain; charset=utf-8"
                };
                return (status, [(header::CONTENT_TYPE, content_type)], body).into_response();
            }
        };

        (status, Json(Status::Error(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_mapping() {
        assert!(matches!(
            ApiError::from(VidbriefError::IndexNotFound("x".to_string())),
            ApiError::NotFound(ref m) if m == "Index not found: x"
        ));
        assert!(matches!(
            ApiError::from(VidbriefError::Vendor { status: 500, body: "boom".to_string() }),
            ApiError::BadGateway(_)
        ));
        assert!(matches!(
            ApiError::from(VidbriefError::IndexingFailed { status: "failed".to_string() }),
            ApiError::Internal(ref m) if m == "Indexing failed with status failed"
        ));
    }

    #[test]
    fn test_upstream_keeps_status() {
        let response = ApiError::Upstream {
            status: 429,
            body: r#"{"error":"rate limited"}"#.to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
    }
}
