//! Error types for the PDF toolbox API

use axum::extract::multipart::MultipartError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pdftools_core::PdfToolsError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMedia(String),

    #[error("Malformed multipart body: {0}")]
    Multipart(#[from] MultipartError),

    #[error("{message}")]
    Operation {
        message: &'static str,
        #[source]
        source: PdfToolsError,
    },
}

/// Map a core error onto the route's response: range problems are the
/// user's fault (400), everything else is reported with the route's
/// generic failure message (500) and the cause goes to the log.
pub fn map_pdf_error(err: PdfToolsError, failure_message: &'static str) -> ApiError {
    match err {
        PdfToolsError::InvalidRange(msg) => ApiError::InvalidRequest(msg),
        source => ApiError::Operation {
            message: failure_message,
            source,
        },
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::UnsupportedMedia(msg) => (StatusCode::UNSUPPORTED_MEDIA_TYPE, msg.clone()),
            ApiError::Multipart(e) => (
                StatusCode::BAD_REQUEST,
                format!("Malformed multipart body: {}", e),
            ),
            ApiError::Operation { message, source } => {
                tracing::error!("PDF operation failed: {}", source);
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
