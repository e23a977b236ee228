//! Benchmarks an extracted term sheet against a corpus of historical deals:
//! market averages from comparable deals, common-clause identification and a
//! factor-based risk profile.

mod deal;
mod engine;

pub use deal::HistoricalDeal;
pub use engine::{
    BenchmarkMetrics, DealBenchmark, RECENCY_WINDOW_DAYS, RiskProfile, VALUATION_TOLERANCE,
};
