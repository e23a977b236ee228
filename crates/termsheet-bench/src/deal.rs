use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One closed deal from the historical corpus.
///
/// Corpora are plain JSON arrays of these, typically maintained by hand, so
/// `terms` may be omitted entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalDeal {
    pub valuation: f64,
    pub equity_percentage: f64,
    pub industry: String,
    /// Closing date, ISO `YYYY-MM-DD`.
    pub date: NaiveDate,
    #[serde(default)]
    pub terms: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corpus_json_parses_with_and_without_terms() {
        let json = r#"[
            {
                "valuation": 5000000,
                "equity_percentage": 18.0,
                "industry": "technology",
                "date": "2024-03-01",
                "terms": ["Board seat", "Tag along"]
            },
            {
                "valuation": 4500000,
                "equity_percentage": 22.5,
                "industry": "technology",
                "date": "2024-05-20"
            }
        ]"#;
        let deals: Vec<HistoricalDeal> = serde_json::from_str(json).unwrap();

        assert_eq!(deals.len(), 2);
        assert_eq!(deals[0].terms, vec!["Board seat", "Tag along"]);
        assert!(deals[1].terms.is_empty());
        assert_eq!(
            deals[0].date,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
    }

    #[test]
    fn malformed_date_is_rejected() {
        let json = r#"{
            "valuation": 1,
            "equity_percentage": 1,
            "industry": "technology",
            "date": "03/01/2024"
        }"#;
        assert!(serde_json::from_str::<HistoricalDeal>(json).is_err());
    }
}
