//! Extraction completeness scoring.

use crate::TermSheetRecord;

/// Presence predicates, one per extracted field.
const FIELD_CHECKS: &[fn(&TermSheetRecord) -> bool] = &[
    |r| !r.company_name.is_empty(),
    |r| r.valuation > 0.0,
    |r| r.investment_amount > 0.0,
    |r| r.equity_percentage > 0.0 && r.equity_percentage <= 100.0,
    |r| !r.investor_names.is_empty(),
    |r| !r.terms.is_empty(),
    |r| !r.date.is_empty(),
];

/// Fraction of field predicates satisfied by the record, in [0, 1].
///
/// The denominator is the predicate count, guarded so an empty table can
/// never divide by zero.
pub fn confidence(record: &TermSheetRecord) -> f64 {
    if FIELD_CHECKS.is_empty() {
        return 0.0;
    }
    let hits = FIELD_CHECKS.iter().filter(|check| check(record)).count();
    hits as f64 / FIELD_CHECKS.len() as f64
}
