//! HTTP handlers for the PDF toolbox API
//!
//! Each handler is stateless: collect the uploaded bytes, hand them to
//! pdftools-core, return the transformed bytes as a download.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use std::sync::Arc;

use pdftools_core::{
    all_pages, compress_document, extract_pages, images_to_pdf, merge_documents, page_count,
    parse_page_range, selects_all, PdfToolsError,
};

use crate::error::{map_pdf_error, ApiError};
use crate::state::AppState;
use crate::upload::{collect_file_and_range, collect_files, MediaClass};

type PdfDownload<const N: usize> = (StatusCode, [(String, String); N], Vec<u8>);

fn content_type_pdf() -> (String, String) {
    ("Content-Type".to_string(), "application/pdf".to_string())
}

fn attachment(filename: &str) -> (String, String) {
    (
        "Content-Disposition".to_string(),
        format!("attachment; filename=\"{}\"", filename),
    )
}

/// Health check endpoint
pub async fn health() -> &'static str {
    "OK"
}

/// Merge the uploaded PDFs, in upload order, into one document.
pub async fn merge(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<PdfDownload<3>, ApiError> {
    let files = collect_files(&mut multipart, &state.limits, MediaClass::Pdf).await?;

    if files.is_empty() {
        return Err(ApiError::InvalidRequest("No PDF files provided".into()));
    }

    let input_count = files.len();
    let documents: Vec<Vec<u8>> = files.into_iter().map(|f| f.bytes).collect();

    let merged = merge_documents(documents).map_err(|e| {
        map_pdf_error(e, "Failed to merge PDFs. Please ensure all files are valid PDFs.")
    })?;

    tracing::info!("Merged {} files into {} bytes", input_count, merged.len());

    Ok((
        StatusCode::OK,
        [
            content_type_pdf(),
            attachment("merged.pdf"),
            ("X-Merged-File-Size".to_string(), merged.len().to_string()),
        ],
        merged,
    ))
}

/// Extract the pages selected by the `range` field into a new PDF.
pub async fn split(
    State(_state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<PdfDownload<2>, ApiError> {
    let (file, range) = collect_file_and_range(&mut multipart, MediaClass::Pdf).await?;

    let file = file.ok_or_else(|| ApiError::InvalidRequest("No PDF file provided".into()))?;

    let total_pages = page_count(&file.bytes).map_err(|e| {
        map_pdf_error(e, "Failed to split PDF. Please ensure the file is valid.")
    })?;

    if total_pages == 0 {
        return Err(ApiError::InvalidRequest("PDF has no pages".into()));
    }

    let indices = if selects_all(&range) {
        all_pages(total_pages)
    } else {
        parse_page_range(&range, total_pages)
    };

    if indices.is_empty() {
        return Err(ApiError::InvalidRequest(
            "No valid pages selected. Use format: 1,3,5 or 1-5".into(),
        ));
    }

    let split = extract_pages(&file.bytes, &indices).map_err(|e| {
        map_pdf_error(e, "Failed to split PDF. Please ensure the file is valid.")
    })?;

    tracing::info!(
        "Extracted {} of {} pages from {}",
        indices.len(),
        total_pages,
        file.name
    );

    Ok((
        StatusCode::OK,
        [content_type_pdf(), attachment("split.pdf")],
        split,
    ))
}

/// Re-save the uploaded PDF with pruned objects and deflated streams.
pub async fn compress(
    State(_state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<PdfDownload<4>, ApiError> {
    let (file, _) = collect_file_and_range(&mut multipart, MediaClass::Pdf).await?;

    let file = file.ok_or_else(|| ApiError::InvalidRequest("No PDF file provided".into()))?;
    let original_size = file.bytes.len();

    let compressed = compress_document(&file.bytes).map_err(|e| {
        map_pdf_error(e, "Failed to compress PDF. Please ensure the file is valid.")
    })?;

    tracing::info!(
        "Compressed {}: {} -> {} bytes",
        file.name,
        original_size,
        compressed.len()
    );

    Ok((
        StatusCode::OK,
        [
            content_type_pdf(),
            attachment("compressed.pdf"),
            ("X-Original-Size".to_string(), original_size.to_string()),
            ("X-Compressed-Size".to_string(), compressed.len().to_string()),
        ],
        compressed,
    ))
}

/// Build a PDF with one page per uploaded image.
pub async fn jpg_to_pdf(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<PdfDownload<2>, ApiError> {
    let files = collect_files(&mut multipart, &state.limits, MediaClass::Image).await?;

    if files.is_empty() {
        return Err(ApiError::InvalidRequest("No image files provided".into()));
    }

    let uploads: Vec<_> = files.into_iter().map(|f| f.into_image_upload()).collect();

    let pdf = images_to_pdf(&uploads).map_err(|e| match e {
        // Every upload failed to decode: that's the caller's input, not us
        PdfToolsError::Image(_) => ApiError::InvalidRequest(
            "Failed to create PDF. Please ensure all files are valid images.".into(),
        ),
        other => map_pdf_error(
            other,
            "Failed to create PDF. Please ensure all files are valid images.",
        ),
    })?;

    tracing::info!("Built image PDF of {} bytes", pdf.len());

    Ok((
        StatusCode::OK,
        [content_type_pdf(), attachment("images.pdf")],
        pdf,
    ))
}
