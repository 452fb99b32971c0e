//! Content pipeline: signature gate, text extraction, routing, and (when the
//! document is scan-like) page rasterization.

use tracing::{info, warn};

use crate::error::ExtractError;
use crate::pdf::rasterize::{self, RasterizeError};
use crate::pdf::{classify, signature, text};
use crate::types::{ParsedContent, ParsedPdf, PdfSource};

/// Parses a PDF into routed content.
///
/// Text-bearing documents (trimmed text of at least `text_threshold`
/// characters) yield [`ParsedContent::Text`]; everything else is rasterized
/// into [`ParsedContent::Images`]. A missing rasterization backend softens to
/// an empty image list; zero usable pages for any other reason is an
/// [`ExtractError::ImageConversion`].
pub async fn parse(source: &PdfSource, text_threshold: usize) -> Result<ParsedPdf, ExtractError> {
    let bytes = match source {
        PdfSource::Path(path) => tokio::fs::read(path).await.map_err(ExtractError::PdfRead)?,
        PdfSource::Bytes(bytes) => bytes.clone(),
    };

    if !signature::has_pdf_signature(&bytes) {
        return Err(ExtractError::InvalidPdf);
    }

    let extracted = text::extract(bytes.clone()).await?;

    if classify::has_extractable_text(&extracted.text, text_threshold) {
        info!(
            pages = extracted.page_count,
            chars = extracted.text.trim().chars().count(),
            "document is text-bearing, routing as text"
        );
        return Ok(ParsedPdf {
            content: ParsedContent::Text {
                body: extracted.text.trim().to_string(),
            },
            page_count: extracted.page_count,
            metadata: extracted.metadata,
        });
    }

    info!(
        pages = extracted.page_count,
        threshold = text_threshold,
        "document is scan-like, rasterizing pages"
    );

    let pages = match rasterize::rasterize(&bytes, extracted.page_count).await {
        Ok(rasterized) => {
            for failure in &rasterized.failures {
                warn!(
                    page = failure.page_number,
                    "page rasterization failed: {}", failure.reason
                );
            }
            if rasterized.pages.is_empty() && !rasterized.failures.is_empty() {
                let causes: Vec<String> = rasterized
                    .failures
                    .iter()
                    .map(|f| format!("page {}: {}", f.page_number, f.reason))
                    .collect();
                return Err(ExtractError::ImageConversion(causes.join("; ")));
            }
            rasterized.pages
        }
        Err(RasterizeError::BackendUnavailable(reason)) => {
            // Optional system tooling may be absent in a deployment; the
            // vision step reports "no text and no images" better than we can.
            warn!("rasterization backend unavailable, continuing with no page images: {reason}");
            Vec::new()
        }
        Err(RasterizeError::Failed(reason)) => {
            return Err(ExtractError::ImageConversion(reason));
        }
    };

    Ok(ParsedPdf {
        content: ParsedContent::Images { pages },
        page_count: extracted.page_count,
        metadata: extracted.metadata,
    })
}
