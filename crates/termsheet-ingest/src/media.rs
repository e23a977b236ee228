//! Declared media types accepted by the pipeline.

use std::path::Path;

use crate::IngestError;

/// Supported input formats, keyed by the caller-declared media type string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Pdf,
    /// Legacy `application/msword`; routed through the same Word reader.
    Doc,
    Docx,
    Png,
    Jpeg,
}

impl MediaType {
    /// Resolve a declared media type string. Anything outside the supported
    /// set is rejected here, before extraction starts.
    pub fn parse(declared: &str) -> Result<Self, IngestError> {
        match declared {
            "application/pdf" => Ok(Self::Pdf),
            "application/msword" => Ok(Self::Doc),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Ok(Self::Docx)
            }
            "image/png" => Ok(Self::Png),
            "image/jpeg" | "image/jpg" => Ok(Self::Jpeg),
            other => Err(IngestError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Infer the media type from a file extension, for callers without a
    /// declared type.
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(Self::Pdf),
            "doc" => Some(Self::Doc),
            "docx" => Some(Self::Docx),
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            _ => None,
        }
    }

    /// Canonical declared media type string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Doc => "application/msword",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }
}
