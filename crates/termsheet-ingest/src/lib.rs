//! Ingestion layer: media-type dispatch, text extraction (PDF, Word, OCR),
//! and the document-processing pipeline.

mod error;
pub use error::IngestError;

mod media;
pub use media::MediaType;

mod docx;
mod ocr;
mod pdf;

mod pipeline;
pub use pipeline::{ProcessedResult, extract_text, process_document};
