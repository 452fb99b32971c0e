// Cheap fast-fail gate run before any heavier PDF parsing is attempted.

use crate::error::ExtractError;
use crate::types::PdfSource;

/// The 4-byte magic every PDF starts with.
const PDF_MAGIC: &[u8] = b"%PDF";

/// Returns true if the buffer begins with the PDF magic header.
pub fn has_pdf_signature(head: &[u8]) -> bool {
    head.starts_with(PDF_MAGIC)
}

/// Checks the signature of a source, reading the file when given a path.
///
/// A filesystem failure on the path form is a [`ExtractError::PdfRead`];
/// a signature mismatch is reported as `Ok(false)`, not an error.
pub async fn validate_signature(source: &PdfSource) -> Result<bool, ExtractError> {
    match source {
        PdfSource::Bytes(bytes) => Ok(has_pdf_signature(bytes)),
        PdfSource::Path(path) => {
            let bytes = tokio::fs::read(path).await.map_err(ExtractError::PdfRead)?;
            Ok(has_pdf_signature(&bytes))
        }
    }
}
