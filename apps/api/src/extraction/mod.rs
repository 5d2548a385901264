//! Document text extraction: turns an uploaded PDF or DOCX into one plain-text string.

use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

pub mod docx;
pub mod pdf;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Failed to parse document '{filename}': {reason}")]
    DocumentParse { filename: String, reason: String },
}

/// Supported upload formats, chosen by filename extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    pub fn from_filename(filename: &str) -> Result<Self, ExtractionError> {
        let lower = filename.to_ascii_lowercase();
        if lower.ends_with(".pdf") {
            Ok(DocumentKind::Pdf)
        } else if lower.ends_with(".docx") {
            Ok(DocumentKind::Docx)
        } else {
            Err(ExtractionError::UnsupportedFileType(filename.to_string()))
        }
    }
}

/// A file received from a multipart form, held in memory for one request.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub content: Bytes,
}

/// Extracts text from an upload. Parsing runs on the blocking pool; a parser panic
/// is reported as a `DocumentParse` error.
pub async fn extract_text(upload: &Upload) -> Result<String, ExtractionError> {
    let kind = DocumentKind::from_filename(&upload.filename)?;
    let content = upload.content.clone();

    let parsed = tokio::task::spawn_blocking(move || match kind {
        DocumentKind::Pdf => pdf::extract_pdf_text(&content),
        DocumentKind::Docx => docx::extract_docx_text(&content),
    })
    .await;

    let text = parsed
        .map_err(|e| e.to_string())
        .and_then(|r| r)
        .map_err(|reason| ExtractionError::DocumentParse {
            filename: upload.filename.clone(),
            reason,
        })?;

    debug!(
        filename = %upload.filename,
        chars = text.chars().count(),
        "Extracted document text"
    );
    Ok(text)
}
