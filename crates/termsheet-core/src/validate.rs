//! Structural and domain validation of extracted records.

use crate::{TermSheetRecord, ValidationIssue};

/// Check a record against the domain rules, returning every finding.
///
/// Rules are independent and all evaluated; the issue order follows the rule
/// declaration order below, so repeated calls on the same record return the
/// same sequence.
pub fn validate(record: &TermSheetRecord) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if record.company_name.is_empty() {
        issues.push(ValidationIssue::error(
            "companyName",
            "Company name is required",
        ));
    }

    if record.valuation <= 0.0 {
        issues.push(ValidationIssue::error(
            "valuation",
            "Valuation must be greater than 0",
        ));
    }

    if record.equity_percentage < 0.0 || record.equity_percentage > 100.0 {
        issues.push(ValidationIssue::error(
            "equityPercentage",
            "Equity percentage must be between 0 and 100",
        ));
    }

    issues
}
