use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error response type
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// RFC 7807 problem details returned for unexpected failures
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
}

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Response type for unhealthy status
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}

/// Custom error type for API endpoints
///
/// Every failure is terminal for its request. Store errors are never retried;
/// they are logged and echoed back verbatim inside a problem-details body.
#[derive(Debug)]
pub enum ApiError {
    /// Key absent from the namespace
    NotFound(String),
    /// Request body or query failed validation
    Validation(String),
    /// Store did not acknowledge a write
    WriteFailed(String),
    /// Any other store failure, including lost connectivity
    Unexpected {
        context: &'static str,
        source: anyhow::Error,
    },
}

impl ApiError {
    pub fn not_found(key: &str) -> Self {
        ApiError::NotFound(format!("Key {} not found in cache", key))
    }

    /// Wrap a store failure with the operation it interrupted
    pub fn unexpected<E: Into<anyhow::Error>>(context: &'static str) -> impl FnOnce(E) -> Self {
        move |source| ApiError::Unexpected {
            context,
            source: source.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::WriteFailed(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Unexpected { context, source } => {
                let detail = format!("{}: {:#}", context, source);
                tracing::error!("{}", detail);

                let status = StatusCode::INTERNAL_SERVER_ERROR;
                let body = Json(ProblemDetails {
                    problem_type: "https://tools.ietf.org/html/rfc7231#section-6.6.1".to_string(),
                    title: "An error occurred while processing your request.".to_string(),
                    status: status.as_u16(),
                    detail,
                });
                return (
                    status,
                    [(header::CONTENT_TYPE, "application/problem+json")],
                    body,
                )
                    .into_response();
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}
