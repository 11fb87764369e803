//! PDF resume upload: extract text, then classify exactly like `/analyze`.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use tracing::{debug, warn};

use crate::analysis::handlers::AnalyzeResponse;
use crate::errors::AppError;
use crate::state::AppState;

pub const MISSING_FILE: &str = "Missing 'file' field";
/// Upper bound on an uploaded resume.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// POST /analyze/upload (multipart, PDF in the `file` part)
pub async fn handle_analyze_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let mut file: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
            file = Some(data);
            break;
        }
    }

    let data = file.ok_or_else(|| AppError::Validation(MISSING_FILE.to_string()))?;
    debug!("Received resume upload ({} bytes)", data.len());

    let text = extract_pdf_text(data).await?;
    let prediction = state.classifier.classify(&text)?;
    Ok(Json(prediction.into()))
}

/// Extracts plain text from PDF bytes on the blocking pool.
/// A panic inside the PDF parser is reported as an unreadable file.
pub async fn extract_pdf_text(data: Bytes) -> Result<String, AppError> {
    if !data.starts_with(b"%PDF") {
        return Err(AppError::UnprocessableEntity(
            "Uploaded file is not a PDF".to_string(),
        ));
    }

    let extracted = tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text_from_mem(&data).map_err(|e| e.to_string())
    })
    .await
    .map_err(|e| {
        warn!("PDF extraction aborted: {e}");
        AppError::UnprocessableEntity("Could not read PDF".to_string())
    })?
    .map_err(|e| AppError::UnprocessableEntity(format!("Could not read PDF: {e}")))?;

    if extracted.trim().is_empty() {
        return Err(AppError::UnprocessableEntity(
            "PDF contains no extractable text".to_string(),
        ));
    }

    Ok(extracted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::single_page_pdf;

    #[tokio::test]
    async fn test_extracts_text_from_pdf() {
        let pdf = single_page_pdf(Some("Java developer Spring Boot Hibernate"));
        let text = extract_pdf_text(Bytes::from(pdf)).await.unwrap();
        assert!(text.contains("Java developer"), "{text:?}");
    }

    #[tokio::test]
    async fn test_blank_pdf_has_no_extractable_text() {
        let err = extract_pdf_text(Bytes::from(single_page_pdf(None)))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
        assert_eq!(err.to_string(), "PDF contains no extractable text");
    }

    #[tokio::test]
    async fn test_non_pdf_is_rejected() {
        let err = extract_pdf_text(Bytes::from_static(b"PK\x03\x04 docx archive"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
        assert_eq!(err.to_string(), "Uploaded file is not a PDF");
    }

    #[tokio::test]
    async fn test_truncated_pdf_is_unprocessable() {
        let err = extract_pdf_text(Bytes::from_static(b"%PDF-1.7\n%garbage"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
    }
}
