//! Resume text extractor — turns an uploaded document into plain text.

use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Pdf,
    PlainText,
}

/// Detects the upload format from magic bytes, then content type, then
/// file extension.
pub fn detect_format(
    file_name: Option<&str>,
    content_type: Option<&str>,
    data: &[u8],
) -> Option<ResumeFormat> {
    if data.starts_with(b"%PDF") {
        return Some(ResumeFormat::Pdf);
    }

    if let Some(ct) = content_type.map(|c| c.to_ascii_lowercase()) {
        if ct == "application/pdf" {
            return Some(ResumeFormat::Pdf);
        }
        if ct.starts_with("text/") {
            return Some(ResumeFormat::PlainText);
        }
    }

    let extension = file_name
        .and_then(|n| n.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("pdf") => Some(ResumeFormat::Pdf),
        Some("txt") | Some("md") => Some(ResumeFormat::PlainText),
        _ => None,
    }
}

/// Extracts plain text from an uploaded resume.
pub async fn extract_resume_text(
    file_name: Option<&str>,
    content_type: Option<&str>,
    data: Bytes,
) -> Result<String, AppError> {
    if data.is_empty() {
        return Err(AppError::Validation("Uploaded resume is empty".to_string()));
    }

    let format = detect_format(file_name, content_type, &data).ok_or_else(|| {
        AppError::UnprocessableEntity(
            "Unsupported resume format. Upload a PDF or plain-text file.".to_string(),
        )
    })?;

    let text = match format {
        ResumeFormat::PlainText => String::from_utf8_lossy(&data).into_owned(),
        ResumeFormat::Pdf => tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&data)
        })
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF extraction task failed: {e}")))?
        .map_err(|e| AppError::UnprocessableEntity(format!("Could not read PDF: {e}")))?,
    };

    if text.trim().is_empty() {
        return Err(AppError::UnprocessableEntity(
            "No readable text found in the resume".to_string(),
        ));
    }

    debug!("Extracted {} characters from {:?} resume", text.len(), format);
    Ok(text)
}
