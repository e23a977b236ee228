//! Rule-based field extraction from term-sheet text.
//!
//! Each field has one case-insensitive pattern with first-match-wins
//! semantics. The label keywords, unit multipliers, and delimiter sets are
//! the extraction contract; changing them silently changes results, so the
//! rules live in one table and each post-processing step is a small testable
//! function.

use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;
use tracing::debug;

use crate::TermSheetRecord;

static COMPANY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:company|corporation|inc\.?):\s*([^\n]+)").unwrap());

static VALUATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)valuation:\s*\$?([\d,]+(?:\.\d+)?)\s*(million|m|billion|b)?").unwrap()
});

static INVESTMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)investment(?:\s*amount)?:\s*\$?([\d,]+(?:\.\d+)?)\s*(million|m|billion|b)?")
        .unwrap()
});

static EQUITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)equity(?:\s*percentage)?:\s*([\d.]+)%").unwrap());

static INVESTORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)investors?:\s*([^\n]+)").unwrap());

static DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)date:\s*(\d{1,2}[-/]\d{1,2}[-/]\d{2,4})").unwrap());

static TERMS_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:terms|conditions|provisions):").unwrap());

/// Terminates a terms block: one of the recognized field labels at a line
/// start. The block ends just before the newline introducing the label.
static NEXT_FIELD_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\n\s*(?:company|valuation|investment|equity|investors|date):").unwrap()
});

/// Bullet (-, •, *) or numbered-list marker at a line start.
static CLAUSE_DELIM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*(?:[-•*]|\d+\.)\s*").unwrap());

static INVESTOR_SPLIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",|\band\b").unwrap());

/// One extraction rule: the field it populates and its apply step. The apply
/// step reports whether its pattern matched.
struct FieldRule {
    field: &'static str,
    apply: fn(&str, &mut TermSheetRecord) -> bool,
}

const RULES: &[FieldRule] = &[
    FieldRule {
        field: "company_name",
        apply: apply_company,
    },
    FieldRule {
        field: "valuation",
        apply: apply_valuation,
    },
    FieldRule {
        field: "investment_amount",
        apply: apply_investment,
    },
    FieldRule {
        field: "equity_percentage",
        apply: apply_equity,
    },
    FieldRule {
        field: "investor_names",
        apply: apply_investors,
    },
    FieldRule {
        field: "terms",
        apply: apply_terms,
    },
    FieldRule {
        field: "date",
        apply: apply_date,
    },
];

/// Extract a structured record from plain term-sheet text.
///
/// Runs every rule in the table; fields with no match keep their zero-value
/// defaults. The date alone has a non-zero fallback: today's ISO calendar
/// date. Extraction never fails on missing fields.
pub fn extract_fields(text: &str) -> TermSheetRecord {
    let mut record = TermSheetRecord::default();
    let mut matched = Vec::new();
    for rule in RULES {
        if (rule.apply)(text, &mut record) {
            matched.push(rule.field);
        }
    }
    if record.date.is_empty() {
        record.date = Utc::now().format("%Y-%m-%d").to_string();
    }
    debug!(
        ?matched,
        clauses = record.terms.len(),
        "fields extracted"
    );
    record
}

fn apply_company(text: &str, record: &mut TermSheetRecord) -> bool {
    let Some(caps) = COMPANY.captures(text) else {
        return false;
    };
    record.company_name = caps[1].trim().to_string();
    true
}

fn apply_valuation(text: &str, record: &mut TermSheetRecord) -> bool {
    let Some(caps) = VALUATION.captures(text) else {
        return false;
    };
    record.valuation = parse_amount(&caps);
    true
}

fn apply_investment(text: &str, record: &mut TermSheetRecord) -> bool {
    let Some(caps) = INVESTMENT.captures(text) else {
        return false;
    };
    record.investment_amount = parse_amount(&caps);
    true
}

fn apply_equity(text: &str, record: &mut TermSheetRecord) -> bool {
    let Some(caps) = EQUITY.captures(text) else {
        return false;
    };
    record.equity_percentage = caps[1].parse().unwrap_or(0.0);
    true
}

fn apply_investors(text: &str, record: &mut TermSheetRecord) -> bool {
    let Some(caps) = INVESTORS.captures(text) else {
        return false;
    };
    record.investor_names = INVESTOR_SPLIT
        .split(&caps[1])
        .map(|piece| piece.trim().to_string())
        .collect();
    true
}

fn apply_terms(text: &str, record: &mut TermSheetRecord) -> bool {
    let Some(label) = TERMS_LABEL.find(text) else {
        return false;
    };
    let rest = &text[label.end()..];
    let end = NEXT_FIELD_LABEL.find(rest).map_or(rest.len(), |m| m.start());
    record.terms = split_clauses(&rest[..end]);
    true
}

fn apply_date(text: &str, record: &mut TermSheetRecord) -> bool {
    let Some(caps) = DATE.captures(text) else {
        return false;
    };
    record.date = caps[1].to_string();
    true
}

/// Parse a captured currency amount: thousands separators stripped, optional
/// unit suffix applied as a multiplier.
fn parse_amount(caps: &regex::Captures<'_>) -> f64 {
    let digits = caps[1].replace(',', "");
    let value: f64 = digits.parse().unwrap_or(0.0);
    value * unit_multiplier(caps.get(2).map(|m| m.as_str()))
}

fn unit_multiplier(unit: Option<&str>) -> f64 {
    match unit.map(str::to_ascii_lowercase).as_deref() {
        Some("million") | Some("m") => 1e6,
        Some("billion") | Some("b") => 1e9,
        _ => 1.0,
    }
}

/// Split a terms block into clauses on bullet or numbered-list markers at
/// line starts. Clauses are trimmed and empties dropped.
pub fn split_clauses(block: &str) -> Vec<String> {
    CLAUSE_DELIM
        .split(block)
        .map(str::trim)
        .filter(|clause| !clause.is_empty())
        .map(str::to_string)
        .collect()
}
