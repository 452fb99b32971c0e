//! Schema-constrained structured data extraction from PDF documents.
//!
//! Each document is routed by extractable-text sufficiency: text-bearing PDFs
//! are sent to a text model, scan-like PDFs are rasterized page by page and
//! sent to a vision model. The model response is constrained to a
//! caller-supplied JSON schema and parsed into the caller's type.

pub mod error;
pub mod extractor;
pub mod llm;
pub mod pdf;
pub mod types;

pub use error::ExtractError;
pub use extractor::config::{ExtractorConfig, DEFAULT_MODEL};
pub use extractor::select::{select, ExtractionMode, ModelSelection, DEFAULT_SYSTEM_PROMPT};
pub use extractor::StructuredExtractor;
pub use llm::client::{LanguageModel, LlmError, OpenAiClient};
pub use llm::types::{
    png_data_url, ChatMessage, ChatOutcome, ChatRequest, ContentPart, MessageContent,
};
pub use pdf::classify::{classify, ContentKind, DEFAULT_TEXT_THRESHOLD};
pub use pdf::pipeline::parse;
pub use pdf::signature::{has_pdf_signature, validate_signature};
pub use types::{
    ExtractionRequest, ExtractionResult, PageImage, ParsedContent, ParsedPdf, PdfSource,
};
