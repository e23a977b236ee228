use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    /// Declared media type is outside the supported set. Raised before any
    /// extraction attempt.
    #[error("unsupported file type: {0}")]
    UnsupportedFormat(String),

    /// The underlying PDF/Word/OCR backend failed to produce readable text.
    #[error("text extraction failed: {0}")]
    ExtractionFailure(String),

    #[error("ocr timed out after {0}s")]
    OcrTimeout(u64),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
