//! Duplicate detection, risk scoring and gap analysis over contract clauses.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use crate::AnalysisError;
use crate::encoder::{ClauseEncoder, LexicalEncoder};

/// Pairwise similarity above this reports the pair as a potential duplicate.
pub const DUPLICATE_THRESHOLD: f32 = 0.95;

/// Analysis running past this many seconds fails with
/// [`AnalysisError::Timeout`].
pub const ANALYSIS_TIMEOUT_SECS: u64 = 20;

const RISK_PHRASES: &[&str] = &[
    "unlimited liability",
    "no cap",
    "unrestricted",
    "perpetual",
    "irrevocable",
    "waiver of rights",
];

const STANDARD_CLAUSES: &[(&str, &[&str])] = &[
    (
        "investment",
        &[
            "Investment Amount",
            "Valuation",
            "Equity Percentage",
            "Payment Terms",
        ],
    ),
    (
        "governance",
        &[
            "Board Composition",
            "Voting Rights",
            "Veto Rights",
            "Information Rights",
        ],
    ),
    (
        "exit",
        &["Exit Rights", "Tag Along", "Drag Along", "IPO Ratchet"],
    ),
];

/// Outcome of analyzing one document's clauses.
#[derive(Debug, Clone, Serialize)]
pub struct ClauseAnalysisResult {
    /// Mean pairwise similarity over distinct clause pairs; 0 below two
    /// clauses.
    pub similarity: f32,
    /// Risk-phrase hits at +0.1 each with multiplicity, clamped to 1.0.
    pub risk_score: f64,
    /// One suggestion per catalog category with missing standard clauses.
    pub suggestions: Vec<String>,
    /// One message per clause pair above [`DUPLICATE_THRESHOLD`].
    pub duplicates: Vec<String>,
}

/// Clause analyzer with a pluggable sentence encoder.
///
/// The default lexical encoder needs no model files. Swap in an ONNX
/// sentence-transformer encoder via [`ClauseAnalyzer::with_encoder`] for
/// semantic similarity.
pub struct ClauseAnalyzer {
    encoder: Arc<dyn ClauseEncoder>,
}

static SHARED: OnceLock<ClauseAnalyzer> = OnceLock::new();

/// Process-wide analyzer with the default encoder, built on first use and
/// reused across calls.
pub fn shared_analyzer() -> &'static ClauseAnalyzer {
    SHARED.get_or_init(ClauseAnalyzer::new)
}

impl ClauseAnalyzer {
    pub fn new() -> Self {
        Self::with_encoder(Arc::new(LexicalEncoder::new()))
    }

    pub fn with_encoder(encoder: Arc<dyn ClauseEncoder>) -> Self {
        Self { encoder }
    }

    /// Analyzes a clause set: mean similarity, duplicate pairs, risk score
    /// and standard-clause gaps.
    pub fn analyze(&self, clauses: &[String]) -> Result<ClauseAnalysisResult, AnalysisError> {
        let texts: Vec<&str> = clauses.iter().map(String::as_str).collect();
        let embeddings = self.encoder.encode_batch(&texts)?;
        let (similarity, duplicates) = similarity_and_duplicates(&embeddings, clauses);
        let risk_score = risk_score(clauses);
        let suggestions = suggest_missing(clauses);
        debug!(
            clauses = clauses.len(),
            duplicates = duplicates.len(),
            risk_score,
            "analyzed clauses"
        );
        Ok(ClauseAnalysisResult {
            similarity,
            risk_score,
            suggestions,
            duplicates,
        })
    }

    /// Like [`ClauseAnalyzer::analyze`], with a wall-clock bound around the
    /// inference call.
    pub async fn analyze_with_deadline(
        &self,
        clauses: Vec<String>,
        deadline: Duration,
    ) -> Result<ClauseAnalysisResult, AnalysisError> {
        let encoder = Arc::clone(&self.encoder);
        let secs = deadline.as_secs();
        let task = tokio::task::spawn_blocking(move || ClauseAnalyzer { encoder }.analyze(&clauses));
        match tokio::time::timeout(deadline, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join)) => Err(AnalysisError::EncodingFailed(join.to_string())),
            Err(_) => Err(AnalysisError::Timeout(secs)),
        }
    }
}

impl Default for ClauseAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Upper-triangle scan of the pairwise similarity matrix. Returns the mean
/// over distinct pairs and the duplicate messages in (i, j) order.
fn similarity_and_duplicates(embeddings: &[Vec<f32>], clauses: &[String]) -> (f32, Vec<String>) {
    let n = embeddings.len();
    if n < 2 {
        return (0.0, Vec::new());
    }
    let mut total = 0.0f32;
    let mut count = 0u32;
    let mut duplicates = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            let sim = dot(&embeddings[i], &embeddings[j]);
            total += sim;
            count += 1;
            if sim > DUPLICATE_THRESHOLD {
                duplicates.push(format!(
                    "Potential duplicate: \"{}\" and \"{}\"",
                    clauses[i], clauses[j]
                ));
            }
        }
    }
    (total / count as f32, duplicates)
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn risk_score(clauses: &[String]) -> f64 {
    let mut score: f64 = 0.0;
    for clause in clauses {
        let lowered = clause.to_lowercase();
        for phrase in RISK_PHRASES {
            if lowered.contains(phrase) {
                score += 0.1;
            }
        }
    }
    score.min(1.0)
}

fn suggest_missing(clauses: &[String]) -> Vec<String> {
    let present: Vec<String> = clauses.iter().map(|c| c.to_lowercase()).collect();
    let mut suggestions = Vec::new();
    for (category, standard) in STANDARD_CLAUSES {
        let missing: Vec<&str> = standard
            .iter()
            .copied()
            .filter(|clause| {
                let lowered = clause.to_lowercase();
                !present.iter().any(|p| p.contains(&lowered))
            })
            .collect();
        if !missing.is_empty() {
            suggestions.push(format!(
                "Consider adding standard {category} clauses: {}",
                missing.join(", ")
            ));
        }
    }
    suggestions
}
