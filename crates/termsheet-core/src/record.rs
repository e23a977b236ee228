//! Shared record types for extracted term sheets.

use serde::{Deserialize, Serialize};

/// Structured extraction target for one term sheet.
///
/// Fields with no pattern match keep their zero-value defaults (0, empty
/// string, empty vec). Absence is a valid terminal state, reflected in the
/// confidence score and validation findings rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TermSheetRecord {
    pub company_name: String,
    /// Currency-normalized: unit words collapse to multipliers (million ×1e6,
    /// billion ×1e9).
    pub valuation: f64,
    pub investment_amount: f64,
    /// Semantically [0,100]; enforced by the validator, not extraction.
    pub equity_percentage: f64,
    /// Document order, duplicates permitted, empty trimmed pieces preserved.
    pub investor_names: Vec<String>,
    /// Clause strings split from the terms/conditions block.
    pub terms: Vec<String>,
    /// Document-native date string, or today's ISO date if absent.
    pub date: String,
}

/// Severity of a validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A data-quality finding returned alongside a still-usable record.
///
/// Error-severity issues block persistence by caller convention; warnings are
/// informational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
    pub severity: Severity,
}

impl ValidationIssue {
    pub fn error(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            severity: Severity::Error,
        }
    }
}

/// Flat snake_case value handed to the record store.
///
/// The pipeline only produces this value; performing the write is the
/// caller's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorePayload {
    pub company_name: String,
    pub valuation: f64,
    pub investment_amount: f64,
    pub equity_percentage: f64,
    pub investor_names: Vec<String>,
    pub terms: Vec<String>,
    pub date: String,
    pub confidence_score: f64,
    pub source_file: String,
    pub user_id: String,
}

impl StorePayload {
    /// Build the store value from an extracted record and its pipeline
    /// metadata.
    pub fn from_record(
        record: &TermSheetRecord,
        confidence_score: f64,
        source_file: &str,
        user_id: &str,
    ) -> Self {
        Self {
            company_name: record.company_name.clone(),
            valuation: record.valuation,
            investment_amount: record.investment_amount,
            equity_percentage: record.equity_percentage,
            investor_names: record.investor_names.clone(),
            terms: record.terms.clone(),
            date: record.date.clone(),
            confidence_score,
            source_file: source_file.to_string(),
            user_id: user_id.to_string(),
        }
    }
}
