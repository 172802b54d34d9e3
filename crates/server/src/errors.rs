use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use service::errors::ServiceError;

/// One violated rule on one payload field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorDetail {
    pub field: String,
    pub message: String,
}

impl ErrorDetail {
    pub fn new(field: &str, message: &str) -> Self {
        Self { field: field.to_string(), message: message.to_string() }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
    details: Option<Vec<ErrorDetail>>,
}

/// API error carrying the response status and the wire body. `details` is
/// populated only for validation failures and serializes as JSON `null`
/// otherwise.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<Vec<ErrorDetail>>,
}

impl ApiError {
    pub fn validation(details: Vec<ErrorDetail>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: "Validation errors on your request".to_string(),
            details: Some(details),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(message) => {
                Self { status: StatusCode::NOT_FOUND, message, details: None }
            }
            ServiceError::Conflict(message) => {
                Self { status: StatusCode::CONFLICT, message, details: None }
            }
            ServiceError::Db(msg) => {
                // the wire gets a generic message; the cause goes to the log
                error!(err = %msg, "store failure");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "Internal server error".to_string(),
                    details: None,
                }
            }
        }
    }
}

// Bodies axum could not deserialize keep axum's status (400 for syntax, 422
// for data errors) but answer in the same wire shape as every other error.
impl From<JsonRejection> for ApiError {
    fn from(rej: JsonRejection) -> Self {
        Self { status: rej.status(), message: rej.body_text(), details: None }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody { message: self.message, details: self.details };
        (self.status, Json(body)).into_response()
    }
}
