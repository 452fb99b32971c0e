use thiserror::Error;

/// Failure taxonomy for the extraction pipeline.
///
/// Every internal failure is re-wrapped into one of these kinds at the
/// boundary of its owning component, preserving the original cause in the
/// message. Nothing is retried inside the crate; transient failures surface
/// immediately and retry policy belongs to the caller.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("API key is required but was not provided")]
    MissingApiKey,

    #[error("exactly one of a PDF path or a PDF buffer must be provided")]
    MissingSource,

    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    #[error("not a valid PDF: buffer does not start with %PDF")]
    InvalidPdf,

    #[error("failed to read PDF file: {0}")]
    PdfRead(#[source] std::io::Error),

    #[error("failed to parse PDF: {0}")]
    PdfParse(String),

    #[error("failed to convert PDF pages to images: {0}")]
    ImageConversion(String),

    #[error("document has no extractable text and vision mode is disabled")]
    VisionDisabled,

    #[error("model returned an empty response")]
    EmptyModelResponse,

    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
}
