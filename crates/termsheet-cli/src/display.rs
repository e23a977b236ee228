//! Vertical card display for processed term sheets and deal reports.
//!
//! Renders extraction results and analysis layers as grouped, human-readable
//! cards; sections with nothing to say are skipped.

use termsheet_bench::BenchmarkMetrics;
use termsheet_core::Severity;
use termsheet_ingest::ProcessedResult;

use crate::report::DealReport;

const MAX_LIST_ITEMS: usize = 10;

// ── Record card ──

/// Print one processed document as a vertical card.
pub fn print_record_card(result: &ProcessedResult) {
    let record = &result.record;
    let name = if record.company_name.is_empty() {
        "(unknown company)"
    } else {
        &record.company_name
    };
    println!("=== {} ===", name);
    println!("{}", result.source);
    println!();

    println!("Extracted Fields");
    println!("  {:<26} {}", "valuation", record.valuation);
    println!("  {:<26} {}", "investment_amount", record.investment_amount);
    println!("  {:<26} {}", "equity_percentage", record.equity_percentage);
    if !record.investor_names.is_empty() {
        println!(
            "  {:<26} {}",
            "investor_names",
            record.investor_names.join(", ")
        );
    }
    println!("  {:<26} {}", "date", record.date);
    println!();

    print_clause_list("terms", &record.terms);

    println!("Processing");
    println!("  {:<26} {:.2}", "confidence", result.confidence);
    println!(
        "  {:<26} {}",
        "timestamp",
        result.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!();

    if !result.issues.is_empty() {
        println!("Validation");
        for issue in &result.issues {
            let severity = match issue.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };
            println!("  {:<26} {} ({})", issue.field, issue.message, severity);
        }
        println!();
    }
}

// ── Report card ──

/// Print the analysis layers over one processed document.
pub fn print_report_card(report: &DealReport) {
    println!("Clause Analysis");
    println!("  {:<26} {:.3}", "mean_similarity", report.clauses.similarity);
    println!("  {:<26} {:.2}", "risk_score", report.clauses.risk_score);
    println!();

    print_clause_list("duplicates", &report.clauses.duplicates);
    print_clause_list("suggestions", &report.clauses.suggestions);

    if let Some(modified) = report.modified {
        println!("Integrity");
        println!(
            "  {}",
            if modified {
                "Document has been modified"
            } else {
                "Document integrity verified"
            }
        );
        println!();
    }

    if let Some(bench) = &report.benchmark {
        print_benchmark(bench);
    }
}

fn print_benchmark(bench: &BenchmarkMetrics) {
    println!("Benchmark");
    println!(
        "  {:<26} {}",
        "industry_avg_valuation", bench.industry_avg_valuation
    );
    println!(
        "  {:<26} {}",
        "industry_avg_equity", bench.industry_avg_equity
    );
    if !bench.common_clauses.is_empty() {
        println!(
            "  {:<26} {}",
            "common_clauses",
            bench.common_clauses.join(", ")
        );
    }
    println!("  {:<26} {:.2}", "risk_profile", bench.risk_profile.score);
    for factor in &bench.risk_profile.factors {
        println!("    {}", factor);
    }
    println!();
}

// ── Helpers ──

fn print_clause_list(label: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("  {} ({}):", label, items.len());
    let show = items.len().min(MAX_LIST_ITEMS);
    for item in &items[..show] {
        println!("    {}", item);
    }
    if items.len() > MAX_LIST_ITEMS {
        println!("    ... and {} more", items.len() - MAX_LIST_ITEMS);
    }
    println!();
}
