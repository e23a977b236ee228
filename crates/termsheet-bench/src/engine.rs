use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use termsheet_core::TermSheetRecord;

use crate::HistoricalDeal;

/// Deals whose relative valuation difference is below this count as
/// comparable.
pub const VALUATION_TOLERANCE: f64 = 0.30;

/// Comparable deals must have closed strictly within this many days.
pub const RECENCY_WINDOW_DAYS: i64 = 365;

/// Additive risk factors for one deal, clamped to a score of at most 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskProfile {
    pub score: f64,
    pub factors: Vec<String>,
}

/// Market context for one deal, derived from its comparable set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkMetrics {
    /// Mean valuation over comparable deals; 0 when there are none.
    pub industry_avg_valuation: f64,
    /// Mean equity percentage over comparable deals; 0 when there are none.
    pub industry_avg_equity: f64,
    /// Clauses appearing in a strict majority of comparable deals, in
    /// first-seen order.
    pub common_clauses: Vec<String>,
    pub risk_profile: RiskProfile,
}

/// Benchmark engine over an owned historical corpus.
pub struct DealBenchmark {
    corpus: Vec<HistoricalDeal>,
}

impl DealBenchmark {
    pub fn new(corpus: Vec<HistoricalDeal>) -> Self {
        Self { corpus }
    }

    /// Scores `record` against comparable deals in the corpus.
    ///
    /// `industry` tags the deal under analysis; `now` anchors the recency
    /// window so results are reproducible.
    pub fn analyze_deal(
        &self,
        record: &TermSheetRecord,
        industry: &str,
        now: NaiveDate,
    ) -> BenchmarkMetrics {
        let comparables = self.comparables(record, industry, now);
        debug!(
            corpus = self.corpus.len(),
            comparables = comparables.len(),
            industry,
            "benchmarking deal"
        );

        let common_clauses = common_clauses(&comparables);
        let risk_profile = risk_profile(record, &comparables, &common_clauses);
        BenchmarkMetrics {
            industry_avg_valuation: mean_valuation(&comparables),
            industry_avg_equity: mean_equity(&comparables),
            common_clauses,
            risk_profile,
        }
    }

    /// Comparable = valuation within tolerance, same industry tag, closed
    /// inside the recency window.
    fn comparables(
        &self,
        record: &TermSheetRecord,
        industry: &str,
        now: NaiveDate,
    ) -> Vec<&HistoricalDeal> {
        self.corpus
            .iter()
            .filter(|deal| {
                let valuation_diff = (deal.valuation - record.valuation).abs() / record.valuation;
                valuation_diff < VALUATION_TOLERANCE
                    && deal.industry == industry
                    && (now - deal.date).num_days() < RECENCY_WINDOW_DAYS
            })
            .collect()
    }
}

fn mean_valuation(deals: &[&HistoricalDeal]) -> f64 {
    if deals.is_empty() {
        return 0.0;
    }
    deals.iter().map(|d| d.valuation).sum::<f64>() / deals.len() as f64
}

fn mean_equity(deals: &[&HistoricalDeal]) -> f64 {
    if deals.is_empty() {
        return 0.0;
    }
    deals.iter().map(|d| d.equity_percentage).sum::<f64>() / deals.len() as f64
}

/// Clauses whose frequency strictly exceeds half the comparable count.
/// Frequency counts every occurrence, so a deal listing a clause twice
/// contributes twice.
fn common_clauses(deals: &[&HistoricalDeal]) -> Vec<String> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for deal in deals {
        for term in &deal.terms {
            let count = counts.entry(term.as_str()).or_insert(0);
            if *count == 0 {
                order.push(term.as_str());
            }
            *count += 1;
        }
    }

    let threshold = deals.len() as f64 * 0.5;
    order
        .into_iter()
        .filter(|clause| counts[clause] as f64 > threshold)
        .map(str::to_string)
        .collect()
}

fn risk_profile(
    record: &TermSheetRecord,
    comparables: &[&HistoricalDeal],
    common_clauses: &[String],
) -> RiskProfile {
    let mut factors = Vec::new();
    let mut score = 0.0;

    // Market-relative rules only apply once there is a market to compare
    // against; with no comparables both averages are 0 and stay out of it.
    if !comparables.is_empty() {
        let avg_valuation = mean_valuation(comparables);
        if record.valuation > avg_valuation * 1.5 {
            factors.push("Valuation significantly above market average".to_string());
            score += 0.2;
        }

        let avg_equity = mean_equity(comparables);
        if record.equity_percentage < avg_equity * 0.7 {
            factors.push("Equity percentage below market average".to_string());
            score += 0.15;
        }
    }

    let missing: Vec<&str> = common_clauses
        .iter()
        .filter(|clause| !record.terms.iter().any(|t| t == *clause))
        .map(String::as_str)
        .collect();
    if !missing.is_empty() {
        factors.push(format!("Missing common clauses: {}", missing.join(", ")));
        score += 0.1 * missing.len() as f64;
    }

    RiskProfile {
        score: score.min(1.0),
        factors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(valuation: f64, equity: f64, terms: &[&str]) -> TermSheetRecord {
        TermSheetRecord {
            company_name: "Acme Corp".into(),
            valuation,
            equity_percentage: equity,
            terms: terms.iter().map(|t| t.to_string()).collect(),
            ..TermSheetRecord::default()
        }
    }

    fn deal(valuation: f64, equity: f64, industry: &str, date: &str, terms: &[&str]) -> HistoricalDeal {
        HistoricalDeal {
            valuation,
            equity_percentage: equity,
            industry: industry.into(),
            date: date.parse().unwrap(),
            terms: terms.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn empty_corpus_yields_zeroed_metrics() {
        let bench = DealBenchmark::new(vec![]);
        let metrics = bench.analyze_deal(&record(5_000_000.0, 20.0, &[]), "technology", today());

        assert_eq!(metrics.industry_avg_valuation, 0.0);
        assert_eq!(metrics.industry_avg_equity, 0.0);
        assert!(metrics.common_clauses.is_empty());
        assert_eq!(metrics.risk_profile.score, 0.0);
        assert!(metrics.risk_profile.factors.is_empty());
    }

    #[test]
    fn comparable_filter_enforces_all_three_conditions() {
        let bench = DealBenchmark::new(vec![
            deal(5_500_000.0, 18.0, "technology", "2025-01-10", &[]),
            // 30% off exactly: relative difference not strictly below tolerance.
            deal(6_500_000.0, 18.0, "technology", "2025-01-10", &[]),
            deal(5_500_000.0, 18.0, "biotech", "2025-01-10", &[]),
            deal(5_500_000.0, 18.0, "technology", "2024-06-02", &[]),
            // 365 days before `today`: outside the strict window.
            deal(5_500_000.0, 18.0, "technology", "2024-06-01", &[]),
        ]);
        let metrics = bench.analyze_deal(&record(5_000_000.0, 20.0, &[]), "technology", today());

        // Only the first and the 364-day-old deal qualify.
        assert_eq!(metrics.industry_avg_valuation, 5_500_000.0);
        assert_eq!(metrics.industry_avg_equity, 18.0);
    }

    #[test]
    fn zero_valuation_record_has_no_comparables() {
        let bench = DealBenchmark::new(vec![deal(
            0.0,
            18.0,
            "technology",
            "2025-01-10",
            &[],
        )]);
        let metrics = bench.analyze_deal(&record(0.0, 20.0, &[]), "technology", today());
        assert_eq!(metrics.industry_avg_valuation, 0.0);
        assert_eq!(metrics.risk_profile.score, 0.0);
    }

    #[test]
    fn common_clauses_need_a_strict_majority() {
        let bench = DealBenchmark::new(vec![
            deal(5_000_000.0, 20.0, "technology", "2025-01-10", &["Board seat", "Tag along"]),
            deal(5_100_000.0, 20.0, "technology", "2025-02-10", &["Board seat"]),
            deal(4_900_000.0, 20.0, "technology", "2025-03-10", &["Drag along"]),
        ]);
        let metrics = bench.analyze_deal(
            &record(5_000_000.0, 20.0, &["Board seat"]),
            "technology",
            today(),
        );

        // "Board seat" appears in 2 of 3 deals (2 > 1.5); the others in 1.
        assert_eq!(metrics.common_clauses, vec!["Board seat"]);
    }

    #[test]
    fn common_clauses_keep_first_seen_order() {
        let bench = DealBenchmark::new(vec![
            deal(5_000_000.0, 20.0, "technology", "2025-01-10", &["Tag along", "Board seat"]),
            deal(5_100_000.0, 20.0, "technology", "2025-02-10", &["Board seat", "Tag along"]),
        ]);
        let metrics = bench.analyze_deal(
            &record(5_000_000.0, 20.0, &["Tag along", "Board seat"]),
            "technology",
            today(),
        );
        assert_eq!(metrics.common_clauses, vec!["Tag along", "Board seat"]);
    }

    #[test]
    fn missing_common_clauses_raise_one_factor_listing_all() {
        let shared = &["Board seat", "Information rights"];
        let bench = DealBenchmark::new(vec![
            deal(5_000_000.0, 20.0, "technology", "2025-01-10", shared),
            deal(5_100_000.0, 20.0, "technology", "2025-02-10", shared),
        ]);
        let metrics = bench.analyze_deal(&record(5_000_000.0, 20.0, &[]), "technology", today());

        assert_eq!(
            metrics.risk_profile.factors,
            vec!["Missing common clauses: Board seat, Information rights"]
        );
        assert!((metrics.risk_profile.score - 0.2).abs() < 1e-9);
    }

    #[test]
    fn verbatim_terms_suppress_the_missing_clause_factor() {
        let shared = &["Board seat"];
        let bench = DealBenchmark::new(vec![
            deal(5_000_000.0, 20.0, "technology", "2025-01-10", shared),
            deal(5_100_000.0, 20.0, "technology", "2025-02-10", shared),
        ]);
        let metrics = bench.analyze_deal(
            &record(5_000_000.0, 20.0, &["Board seat"]),
            "technology",
            today(),
        );
        assert!(metrics.risk_profile.factors.is_empty());
        assert_eq!(metrics.risk_profile.score, 0.0);
    }

    #[test]
    fn low_equity_against_market_average_adds_risk() {
        let bench = DealBenchmark::new(vec![
            deal(5_000_000.0, 20.0, "technology", "2025-01-10", &[]),
            deal(5_200_000.0, 20.0, "technology", "2025-02-10", &[]),
        ]);
        // 10% is below 0.7 x the 20% market average.
        let metrics = bench.analyze_deal(&record(5_000_000.0, 10.0, &[]), "technology", today());

        assert_eq!(
            metrics.risk_profile.factors,
            vec!["Equity percentage below market average"]
        );
        assert!((metrics.risk_profile.score - 0.15).abs() < 1e-9);
    }

    #[test]
    fn valuation_far_above_market_average_adds_risk() {
        // The comparable filter keeps averages within 30% of the record, so
        // this rule is exercised directly on an unfiltered slice.
        let corpus = vec![
            deal(1_000_000.0, 20.0, "technology", "2025-01-10", &[]),
            deal(1_200_000.0, 20.0, "technology", "2025-02-10", &[]),
        ];
        let comparables: Vec<&HistoricalDeal> = corpus.iter().collect();
        let profile = risk_profile(&record(5_000_000.0, 20.0, &[]), &comparables, &[]);

        assert!(
            profile
                .factors
                .contains(&"Valuation significantly above market average".to_string())
        );
        assert!((profile.score - 0.2).abs() < 1e-9);
    }

    #[test]
    fn risk_score_clamps_at_one() {
        let many_terms: Vec<String> = (0..11).map(|i| format!("Clause {i}")).collect();
        let many_refs: Vec<&str> = many_terms.iter().map(String::as_str).collect();
        let bench = DealBenchmark::new(vec![
            deal(5_000_000.0, 20.0, "technology", "2025-01-10", &many_refs),
            deal(5_100_000.0, 20.0, "technology", "2025-02-10", &many_refs),
        ]);
        let metrics = bench.analyze_deal(&record(5_000_000.0, 20.0, &[]), "technology", today());

        // 11 missing clauses at 0.1 each, clamped.
        assert_eq!(metrics.risk_profile.score, 1.0);
    }
}
