use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum TrainingLogError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Invalid request: {message}")]
    InvalidBody { status: StatusCode, message: String },
    #[error("Internal failure: {0}")]
    Store(#[from] StoreError),
}

impl IntoResponse for TrainingLogError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self {
            TrainingLogError::Validation(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation_failed")
            }
            TrainingLogError::InvalidBody { status, .. } => (*status, "invalid_request"),
            TrainingLogError::Store(e) => {
                error!("History store failure: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_failure")
            }
        };

        let body = Json(json!({
            "error": error_code,
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}

impl From<validator::ValidationErrors> for TrainingLogError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .collect();
        messages.sort();

        TrainingLogError::Validation(messages.join("; "))
    }
}

impl From<axum::extract::rejection::JsonRejection> for TrainingLogError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        TrainingLogError::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<axum::extract::rejection::QueryRejection> for TrainingLogError {
    fn from(rejection: axum::extract::rejection::QueryRejection) -> Self {
        TrainingLogError::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}
