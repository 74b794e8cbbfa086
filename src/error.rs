use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// All errors that can surface from a request.
///
/// Validation and bad-request errors map to 400; a missing startup
/// resource or a scoring fault maps to 500. Startup load failures never
/// construct this type directly — they degrade the corresponding
/// `AppState` slot and show up later as `NotReady`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    Validation { field: String, message: String },

    #[error("{0}")]
    BadRequest(String),

    #[error("{0} not loaded")]
    NotReady(&'static str),

    #[error("scoring failed: {0}")]
    Scoring(String),
}

impl ApiError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        ApiError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotReady(_) | ApiError::Scoring(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut body = json!({
            "status": "error",
            "message": self.to_string(),
        });
        if let ApiError::Validation { field, .. } = self {
            body["field"] = json!(field);
        }
        HttpResponse::build(self.status_code()).json(body)
    }
}
