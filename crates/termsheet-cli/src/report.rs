use std::time::Duration;

use chrono::Utc;
use serde::Serialize;

use termsheet_ai::{ANALYSIS_TIMEOUT_SECS, AnalysisError, ClauseAnalysisResult, shared_analyzer};
use termsheet_bench::{BenchmarkMetrics, DealBenchmark, HistoricalDeal};
use termsheet_crypto::detect_modifications;
use termsheet_ingest::ProcessedResult;

/// Composite analysis over one processed document.
#[derive(Debug, Serialize)]
pub struct DealReport {
    pub clauses: ClauseAnalysisResult,
    /// `Some(true)` when the document bytes no longer match the expected
    /// digest; `None` when no digest was supplied.
    pub modified: Option<bool>,
    /// Market context; `None` when no corpus was supplied.
    pub benchmark: Option<BenchmarkMetrics>,
}

/// Runs clause analysis plus the optional integrity and benchmark layers.
pub async fn build_report(
    result: &ProcessedResult,
    raw_bytes: &[u8],
    expected_digest: Option<&str>,
    corpus: Option<Vec<HistoricalDeal>>,
    industry: &str,
) -> Result<DealReport, AnalysisError> {
    let clauses = shared_analyzer()
        .analyze_with_deadline(
            result.record.terms.clone(),
            Duration::from_secs(ANALYSIS_TIMEOUT_SECS),
        )
        .await?;

    let modified = expected_digest.map(|digest| detect_modifications(digest, raw_bytes));

    let benchmark = corpus.map(|deals| {
        DealBenchmark::new(deals).analyze_deal(&result.record, industry, Utc::now().date_naive())
    });

    Ok(DealReport {
        clauses,
        modified,
        benchmark,
    })
}
