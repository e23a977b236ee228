use tracing::debug;

use crate::IngestError;

/// Extracts text from a PDF, page by page.
///
/// Items on a page are joined with single spaces and pages are joined with
/// newlines, so downstream field extraction sees one line per page region.
/// The parser can panic on malformed fonts, so the call is contained.
pub fn extract_pdf(bytes: &[u8]) -> Result<String, IngestError> {
    let pages = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }))
    .map_err(|_| IngestError::ExtractionFailure("pdf parser panicked".into()))?
    .map_err(|e| IngestError::ExtractionFailure(e.to_string()))?;

    debug!(pages = pages.len(), "extracted pdf text");
    let text = pages
        .iter()
        .map(|page| page.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n");
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_an_error_not_a_panic() {
        let result = extract_pdf(b"not a pdf at all");
        assert!(matches!(result, Err(IngestError::ExtractionFailure(_))));
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(extract_pdf(b"").is_err());
    }

    #[test]
    fn truncated_header_is_an_error() {
        assert!(extract_pdf(b"%PDF-1.7\n1 0 obj\n<<").is_err());
    }
}
