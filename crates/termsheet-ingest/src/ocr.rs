use std::io::Write;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::sync::OnceCell;
use tokio::time::timeout;
use tracing::{debug, info};

use crate::{IngestError, MediaType};

/// Scanned pages that keep the engine spinning past this many seconds
/// surface as [`IngestError::OcrTimeout`].
pub const OCR_TIMEOUT_SECS: u64 = 30;

static OCR_ENGINE: OnceCell<OcrEngine> = OnceCell::const_new();

/// Handle to the system `tesseract` binary, probed once per process.
/// A failed probe is not cached; the next call retries it.
struct OcrEngine {
    version: String,
}

async fn engine() -> Result<&'static OcrEngine, IngestError> {
    OCR_ENGINE
        .get_or_try_init(|| async {
            let output = Command::new("tesseract")
                .arg("--version")
                .stdin(Stdio::null())
                .output()
                .await
                .map_err(|e| {
                    IngestError::ExtractionFailure(format!("ocr engine unavailable: {e}"))
                })?;
            if !output.status.success() {
                return Err(IngestError::ExtractionFailure(
                    "ocr engine unavailable: version probe failed".into(),
                ));
            }
            let version = String::from_utf8_lossy(&output.stdout)
                .lines()
                .next()
                .unwrap_or("tesseract")
                .to_string();
            info!(version = %version, "ocr engine ready");
            Ok(OcrEngine { version })
        })
        .await
}

/// Runs a raster image through OCR and returns the recognized text.
pub async fn recognize(bytes: &[u8], media: MediaType) -> Result<String, IngestError> {
    let suffix = match media {
        MediaType::Png => ".png",
        MediaType::Jpeg => ".jpg",
        other => return Err(IngestError::UnsupportedFormat(other.as_str().to_string())),
    };

    let engine = engine().await?;

    // The engine reads from disk, so the bytes go through a scratch file
    // that is removed when the guard drops.
    let mut input = tempfile::Builder::new()
        .prefix("termsheet-")
        .suffix(suffix)
        .tempfile()?;
    input.write_all(bytes)?;

    debug!(engine = %engine.version, bytes = bytes.len(), "running ocr");
    let run = Command::new("tesseract")
        .arg(input.path())
        .arg("stdout")
        .args(["-l", "eng"])
        .stdin(Stdio::null())
        .output();
    let output = timeout(Duration::from_secs(OCR_TIMEOUT_SECS), run)
        .await
        .map_err(|_| IngestError::OcrTimeout(OCR_TIMEOUT_SECS))??;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(IngestError::ExtractionFailure(format!(
            "ocr failed: {}",
            stderr.trim()
        )));
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
