//! Document Extractor — converts a raw resume file (plain text or PDF) into
//! normalized single-line text.
//!
//! Non-PDF files are decoded with an ordered list of candidate encodings;
//! the first strict (no replacement characters) decode wins. PDF files go
//! through `pdf-extract`, page texts concatenated in page order. Either way
//! the output contains no newline characters — downstream prompt
//! construction and table display rely on that.

use std::path::Path;

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8, WINDOWS_1252};
use tokio::fs;
use tracing::debug;

use crate::errors::RankerError;

/// Candidate encodings tried in order for non-PDF input. WINDOWS_1252 is the
/// WHATWG superset of Latin-1/ISO-8859-1; it rejects only the five unmapped
/// bytes (0x81, 0x8D, 0x8F, 0x90, 0x9D), so a strict decode can still fail.
const TEXT_ENCODINGS: [&Encoding; 4] = [UTF_8, WINDOWS_1252, UTF_16LE, UTF_16BE];

/// Extracts normalized plain text from one resume file.
///
/// Fails with `UnsupportedEncoding` when no candidate encoding can decode a
/// non-PDF file (or the file is missing), and with `CorruptDocument` when a
/// PDF cannot be opened. Deterministic for identical file content.
pub async fn extract(path: &Path) -> Result<String, RankerError> {
    if is_pdf(path) {
        extract_pdf(path).await
    } else {
        extract_text(path).await
    }
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

async fn extract_pdf(path: &Path) -> Result<String, RankerError> {
    let bytes = fs::read(path).await.map_err(|e| RankerError::CorruptDocument {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    // extract_text_from_mem walks every page in order and concatenates the
    // page texts; a document that cannot be opened or paginated errors out
    // as a whole (no partial page tolerance).
    let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
        RankerError::CorruptDocument {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    })?;

    debug!(path = %path.display(), chars = text.len(), "extracted PDF text");
    Ok(normalize(&text))
}

async fn extract_text(path: &Path) -> Result<String, RankerError> {
    let bytes = fs::read(path).await.map_err(|_| RankerError::UnsupportedEncoding {
        path: path.to_path_buf(),
    })?;

    for encoding in TEXT_ENCODINGS {
        if let Some(decoded) = encoding.decode_without_bom_handling_and_without_replacement(&bytes)
        {
            debug!(
                path = %path.display(),
                encoding = encoding.name(),
                "decoded text resume"
            );
            return Ok(normalize(&decoded));
        }
    }

    Err(RankerError::UnsupportedEncoding {
        path: path.to_path_buf(),
    })
}

/// Collapses every newline (`\r\n`, `\n`, `\r`) to a single space.
fn normalize(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}
