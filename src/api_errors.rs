use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::errors::PredictionError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Unprocessable(String),
    #[error("{0}")]
    Unavailable(String),
}

#[derive(Serialize)]
struct ErrBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, msg) = match &self {
            AppError::Unprocessable(s) => (StatusCode::UNPROCESSABLE_ENTITY, s),
            AppError::Unavailable(s) => (StatusCode::SERVICE_UNAVAILABLE, s),
        };
        (code, Json(ErrBody { error: msg.clone() })).into_response()
    }
}

impl From<PredictionError> for AppError {
    fn from(err: PredictionError) -> Self {
        match err {
            PredictionError::ModelUnavailable => AppError::Unavailable(err.to_string()),
            PredictionError::InferenceFailure { .. } => AppError::Unprocessable(err.to_string()),
        }
    }
}
