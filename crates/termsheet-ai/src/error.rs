use thiserror::Error;

/// Failures surfaced by clause analysis.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The sentence-embedding model could not be loaded. Fails the whole
    /// analysis; there are no partial results.
    #[error("embedding model unavailable: {0}")]
    ModelUnavailable(String),
    /// Encoding the clause batch failed after the model loaded.
    #[error("clause encoding failed: {0}")]
    EncodingFailed(String),
    /// Analysis did not finish inside the allowed window.
    #[error("analysis timed out after {0}s")]
    Timeout(u64),
}
