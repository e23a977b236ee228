//! Clause analysis: sentence encoding, duplicate detection, risk scoring and
//! gap analysis against a standard clause catalog.

mod clauses;
mod encoder;
mod error;
#[cfg(feature = "onnx")]
mod onnx;

pub use clauses::{
    ANALYSIS_TIMEOUT_SECS, ClauseAnalysisResult, ClauseAnalyzer, DUPLICATE_THRESHOLD,
    shared_analyzer,
};
pub use encoder::{ClauseEncoder, DEFAULT_DIM, LexicalEncoder};
pub use error::AnalysisError;
#[cfg(feature = "onnx")]
pub use onnx::OnnxEncoder;
