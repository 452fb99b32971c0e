//! Text-extraction collaborator: full plain text, page count, and document
//! metadata from in-memory PDF bytes.
//!
//! `pdf-extract` produces the text; `lopdf` supplies the page count and the
//! Info dictionary. Both are blocking and run on the blocking pool.

use std::collections::HashMap;

use lopdf::{Document, Object};
use tracing::debug;

use crate::error::ExtractError;

/// Everything the text-extraction stage yields for one document.
#[derive(Debug)]
pub struct ExtractedText {
    pub text: String,
    pub page_count: u32,
    pub metadata: Option<HashMap<String, String>>,
}

/// Extracts text, page count, and metadata from PDF bytes.
///
/// Fails with [`ExtractError::PdfParse`] when the bytes cannot be parsed as
/// a PDF at all.
pub async fn extract(bytes: Vec<u8>) -> Result<ExtractedText, ExtractError> {
    let extracted = tokio::task::spawn_blocking(move || extract_blocking(&bytes))
        .await
        .map_err(|e| ExtractError::PdfParse(format!("extraction task failed: {e}")))??;

    debug!(
        chars = extracted.text.len(),
        pages = extracted.page_count,
        "extracted PDF text"
    );
    Ok(extracted)
}

fn extract_blocking(bytes: &[u8]) -> Result<ExtractedText, ExtractError> {
    let doc = Document::load_mem(bytes)
        .map_err(|e| ExtractError::PdfParse(format!("failed to load document: {e}")))?;

    let page_count = doc.get_pages().len() as u32;
    let metadata = info_metadata(&doc);

    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExtractError::PdfParse(format!("failed to extract text: {e}")))?;

    Ok(ExtractedText {
        text,
        page_count,
        metadata,
    })
}

/// Collects the string-valued entries of the trailer's Info dictionary.
fn info_metadata(doc: &Document) -> Option<HashMap<String, String>> {
    let info = match doc.trailer.get(b"Info").ok()? {
        Object::Reference(id) => doc.get_object(*id).ok()?,
        other => other,
    };
    let dict = info.as_dict().ok()?;

    let mut map = HashMap::new();
    for (key, value) in dict.iter() {
        if let Object::String(bytes, _) = value {
            map.insert(
                String::from_utf8_lossy(key).into_owned(),
                String::from_utf8_lossy(bytes).into_owned(),
            );
        }
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::test_support::{text_pdf, text_pdf_with_info};

    #[tokio::test]
    async fn extracts_text_and_page_count() {
        let bytes = text_pdf(&["Hello extraction world"]);
        let extracted = extract(bytes).await.unwrap();
        assert_eq!(extracted.page_count, 1);
        assert!(extracted.text.contains("Hello extraction world"));
    }

    #[tokio::test]
    async fn counts_all_pages() {
        let bytes = text_pdf(&["page one", "page two", "page three"]);
        let extracted = extract(bytes).await.unwrap();
        assert_eq!(extracted.page_count, 3);
    }

    #[tokio::test]
    async fn surfaces_info_dictionary_metadata() {
        let bytes = text_pdf_with_info("Quarterly Report", "Finance");
        let extracted = extract(bytes).await.unwrap();
        let metadata = extracted.metadata.expect("metadata expected");
        assert_eq!(metadata.get("Title").map(String::as_str), Some("Quarterly Report"));
        assert_eq!(metadata.get("Author").map(String::as_str), Some("Finance"));
    }

    #[tokio::test]
    async fn unparseable_bytes_fail_with_parse_error() {
        let err = extract(b"%PDF-1.7 but not actually a pdf".to_vec())
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::PdfParse(_)));
    }
}
