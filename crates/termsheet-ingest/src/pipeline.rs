use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use termsheet_core::{
    Severity, StorePayload, TermSheetRecord, ValidationIssue, confidence, extract_fields, validate,
};

use crate::{IngestError, MediaType, docx, ocr, pdf};

/// Outcome of one pipeline run over a single document.
///
/// Immutable once built. Persistence writes a copy produced by
/// [`ProcessedResult::store_payload`], never this value itself.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedResult {
    pub record: TermSheetRecord,
    /// Share of the seven extraction targets that matched, in [0, 1].
    pub confidence: f64,
    /// Filename the bytes were read from.
    pub source: String,
    /// Instant the pipeline produced this result.
    pub timestamp: DateTime<Utc>,
    /// Data-quality findings for the record as extracted.
    pub issues: Vec<ValidationIssue>,
}

impl ProcessedResult {
    /// True when no error-severity finding was raised.
    pub fn is_valid(&self) -> bool {
        self.issues.iter().all(|i| i.severity != Severity::Error)
    }

    /// Flat value for the record store, stamped with the owning user.
    pub fn store_payload(&self, user_id: &str) -> StorePayload {
        StorePayload::from_record(&self.record, self.confidence, &self.source, user_id)
    }
}

/// Converts raw document bytes into plain text, dispatching on media type.
///
/// Legacy `.doc` bytes go through the same reader as `.docx`; documents the
/// reader cannot parse surface as [`IngestError::ExtractionFailure`].
pub async fn extract_text(bytes: &[u8], media: MediaType) -> Result<String, IngestError> {
    match media {
        MediaType::Pdf => pdf::extract_pdf(bytes),
        MediaType::Doc | MediaType::Docx => docx::extract_docx(bytes),
        MediaType::Png | MediaType::Jpeg => ocr::recognize(bytes, media).await,
    }
}

/// Full pipeline for one document: text extraction, field parsing,
/// confidence scoring and validation.
pub async fn process_document(
    bytes: &[u8],
    media: MediaType,
    source: &str,
) -> Result<ProcessedResult, IngestError> {
    let text = extract_text(bytes, media).await?;
    let record = extract_fields(&text);
    let confidence = confidence(&record);
    let issues = validate(&record);
    info!(
        source,
        media = media.as_str(),
        confidence,
        issues = issues.len(),
        "processed document"
    );
    Ok(ProcessedResult {
        record,
        confidence,
        source: source.to_string(),
        timestamp: Utc::now(),
        issues,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Paragraph, Run};
    use std::io::Cursor;

    fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
        let mut docx = Docx::new();
        for text in paragraphs {
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)));
        }
        let mut buf = Cursor::new(Vec::new());
        docx.build().pack(&mut buf).unwrap();
        buf.into_inner()
    }

    #[tokio::test]
    async fn docx_end_to_end() {
        let bytes = docx_bytes(&[
            "Company: Acme Corp",
            "Valuation: $5 million",
            "Equity: 20%",
            "Date: 01/15/2024",
        ]);
        let before = Utc::now();
        let result = process_document(&bytes, MediaType::Docx, "acme.docx")
            .await
            .unwrap();

        assert_eq!(result.record.company_name, "Acme Corp");
        assert_eq!(result.record.valuation, 5_000_000.0);
        assert_eq!(result.record.equity_percentage, 20.0);
        assert_eq!(result.record.date, "01/15/2024");
        assert!((result.confidence - 4.0 / 7.0).abs() < 1e-12);
        assert!(result.issues.is_empty());
        assert!(result.is_valid());
        assert_eq!(result.source, "acme.docx");
        assert!(result.timestamp >= before && result.timestamp <= Utc::now());
    }

    #[tokio::test]
    async fn invalid_extraction_reports_issues() {
        let bytes = docx_bytes(&["Equity: 150%"]);
        let result = process_document(&bytes, MediaType::Docx, "bad.docx")
            .await
            .unwrap();

        assert!(!result.is_valid());
        let fields: Vec<&str> = result.issues.iter().map(|i| i.field.as_str()).collect();
        assert!(fields.contains(&"companyName"));
        assert!(fields.contains(&"equityPercentage"));
    }

    #[tokio::test]
    async fn pdf_garbage_propagates_extraction_failure() {
        let result = process_document(b"not a pdf", MediaType::Pdf, "junk.pdf").await;
        assert!(matches!(result, Err(IngestError::ExtractionFailure(_))));
    }

    #[tokio::test]
    async fn store_payload_carries_pipeline_metadata() {
        let bytes = docx_bytes(&["Company: Nimbus Robotics", "Valuation: $12 million"]);
        let result = process_document(&bytes, MediaType::Docx, "nimbus.docx")
            .await
            .unwrap();
        let payload = result.store_payload("user-42");

        assert_eq!(payload.company_name, "Nimbus Robotics");
        assert_eq!(payload.confidence_score, result.confidence);
        assert_eq!(payload.source_file, "nimbus.docx");
        assert_eq!(payload.user_id, "user-42");
    }
}
