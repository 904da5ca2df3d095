//! Error types for the Sharp Toolkit API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sharptools_core::SharpToolsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No PDF uploaded")]
    MissingFile,

    #[error("No pages specified")]
    MissingPages,

    #[error("At least 2 PDF files are required for merging")]
    TooFewDocuments,

    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    #[error(transparent)]
    Pdf(#[from] SharpToolsError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::MissingFile | ApiError::MissingPages | ApiError::TooFewDocuments => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            ApiError::InvalidUpload(detail) => {
                tracing::warn!("Rejected malformed upload: {}", detail);
                (StatusCode::BAD_REQUEST, "Invalid upload".to_string())
            }
            ApiError::Pdf(e) => {
                // Clients get a generic message; the detail stays in the logs
                tracing::error!("Error processing PDF: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error processing PDF".to_string(),
                )
            }
        };

        (status, message).into_response()
    }
}
