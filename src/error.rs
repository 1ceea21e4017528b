use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("No images found")]
    NoImages,

    #[error("Image store error: {0}")]
    Store(#[from] mongodb::error::Error),

    #[error("Image download failed: {0}")]
    ImageDownload(String),

    #[error("Analysis model error: {0}")]
    Model(String),

    #[error("Speech synthesis failed: {0}")]
    Speech(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ErrorResponse {
    Message { message: String },
    Error { error: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::NoImages => (
                StatusCode::NOT_FOUND,
                ErrorResponse::Message {
                    message: "No images found".to_string(),
                },
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::Error {
                    error: "Failed to generate analysis".to_string(),
                },
            ),
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }

        (status, Json(body)).into_response()
    }
}
