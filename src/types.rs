use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where the PDF bytes come from.
#[derive(Debug, Clone)]
pub enum PdfSource {
    /// A path on the local filesystem, read fully into memory before parsing.
    Path(PathBuf),
    /// The document bytes held directly in memory.
    Bytes(Vec<u8>),
}

impl From<PathBuf> for PdfSource {
    fn from(path: PathBuf) -> Self {
        PdfSource::Path(path)
    }
}

impl From<Vec<u8>> for PdfSource {
    fn from(bytes: Vec<u8>) -> Self {
        PdfSource::Bytes(bytes)
    }
}

/// A single rasterized page. Page numbers are 1-indexed and follow source
/// page order; gaps are possible when some pages failed to rasterize.
#[derive(Debug, Clone)]
pub struct PageImage {
    pub page_number: u32,
    /// Encoded PNG bytes.
    pub image_bytes: Vec<u8>,
}

/// The routed content of a parsed document: either the extracted text body
/// (trimmed, non-empty) or the rasterized page images.
#[derive(Debug, Clone)]
pub enum ParsedContent {
    Text { body: String },
    Images { pages: Vec<PageImage> },
}

/// Result of running the content pipeline over a PDF.
///
/// `page_count` always reflects the document's true page count, even when
/// `content` carries fewer successfully rasterized pages.
#[derive(Debug, Clone)]
pub struct ParsedPdf {
    pub content: ParsedContent,
    pub page_count: u32,
    /// String entries of the PDF Info dictionary (Title, Author, ...), if any.
    pub metadata: Option<HashMap<String, String>>,
}

/// One extraction call. Exactly one of `pdf_path` / `pdf_buffer` must be set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionRequest {
    /// JSON schema the model response must conform to.
    pub schema: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_buffer: Option<Vec<u8>>,
    /// Overrides the configured default temperature for this call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

impl ExtractionRequest {
    pub fn from_path(schema: Value, path: impl Into<PathBuf>) -> Self {
        Self {
            schema,
            pdf_path: Some(path.into()),
            pdf_buffer: None,
            temperature: None,
            max_output_tokens: None,
        }
    }

    pub fn from_bytes(schema: Value, bytes: Vec<u8>) -> Self {
        Self {
            schema,
            pdf_path: None,
            pdf_buffer: Some(bytes),
            temperature: None,
            max_output_tokens: None,
        }
    }
}

/// Typed extraction outcome.
#[derive(Debug, Clone)]
pub struct ExtractionResult<T> {
    /// The model response parsed per the request schema.
    pub data: T,
    /// Total tokens reported by the API, when present.
    pub tokens_used: Option<u32>,
    /// Model identifier reported by the API.
    pub model_used: String,
}
