//! HTTP request handlers for the Sharp Toolkit API

use axum::{extract::Multipart, http::StatusCode, Json};
use serde::Serialize;
use sharptools_core::{merge_documents, parse_selection, split_document};
use tracing::info;

use crate::error::ApiError;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

type PdfDownload = (StatusCode, [(String, String); 2], Vec<u8>);

fn pdf_download(filename: &str, bytes: Vec<u8>) -> PdfDownload {
    (
        StatusCode::OK,
        [
            ("Content-Type".to_string(), "application/pdf".to_string()),
            (
                "Content-Disposition".to_string(),
                format!("attachment; filename={}", filename),
            ),
        ],
        bytes,
    )
}

/// Extract the requested pages from an uploaded PDF.
///
/// Multipart fields: `file` (the PDF) and `pages` (comma-separated 1-based
/// page numbers, applied in the order given). Page numbers that do not
/// parse or do not exist are dropped silently, so a selection of only bad
/// tokens yields a zero-page document rather than an error.
pub async fn split(mut multipart: Multipart) -> Result<PdfDownload, ApiError> {
    let mut file: Option<Vec<u8>> = None;
    let mut pages: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidUpload(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::InvalidUpload(e.to_string()))?;
                file = Some(data.to_vec());
            }
            "pages" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::InvalidUpload(e.to_string()))?;
                pages = Some(text);
            }
            _ => {}
        }
    }

    let file = file.ok_or(ApiError::MissingFile)?;
    // An absent field and an empty one are both "no pages"; whitespace-only
    // input passes through and ends up as an empty selection.
    let pages = pages
        .filter(|p| !p.is_empty())
        .ok_or(ApiError::MissingPages)?;

    let selection = parse_selection(&pages);
    let output = split_document(&file, &selection)?;

    info!(
        "split: {} bytes in, {} pages requested, {} bytes out",
        file.len(),
        selection.len(),
        output.len()
    );

    Ok(pdf_download("split.pdf", output))
}

/// Merge the uploaded PDFs into a single document, in upload order.
///
/// Multipart field `files`, repeated once per document (`files[]` is also
/// accepted). At least two documents are required.
pub async fn merge(mut multipart: Multipart) -> Result<PdfDownload, ApiError> {
    let mut files: Vec<Vec<u8>> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidUpload(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "files" || name == "files[]" {
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::InvalidUpload(e.to_string()))?;
            files.push(data.to_vec());
        }
    }

    if files.len() < 2 {
        return Err(ApiError::TooFewDocuments);
    }

    let count = files.len();
    let output = merge_documents(files)?;

    info!("merge: {} documents, {} bytes out", count, output.len());

    Ok(pdf_download("merged.pdf", output))
}
