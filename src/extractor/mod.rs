//! Extraction orchestrator: validates the request, routes parsed content to a
//! text or vision model call, and parses the schema-constrained response.

pub mod config;
pub mod schema;
pub mod select;

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::error::ExtractError;
use crate::llm::client::{LanguageModel, OpenAiClient};
use crate::llm::types::{ChatMessage, ChatRequest, ContentPart};
use crate::pdf::pipeline;
use crate::types::{ExtractionRequest, ExtractionResult, ParsedContent, PdfSource};

use self::config::ExtractorConfig;
use self::select::ExtractionMode;

const TEXT_INSTRUCTION: &str =
    "Extract the structured fields described by the schema from the following document text.";
const VISION_INSTRUCTION: &str =
    "Extract the structured fields described by the schema from the attached document page images.";

/// Schema-constrained PDF extractor over an OpenAI-compatible model.
pub struct StructuredExtractor {
    config: ExtractorConfig,
    model: Box<dyn LanguageModel>,
}

impl std::fmt::Debug for StructuredExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StructuredExtractor")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl StructuredExtractor {
    /// Builds an extractor with the bundled HTTP client.
    ///
    /// Fails fast with [`ExtractError::MissingApiKey`] when the key is empty.
    pub fn new(config: ExtractorConfig) -> Result<Self, ExtractError> {
        if config.api_key.trim().is_empty() {
            return Err(ExtractError::MissingApiKey);
        }
        let model = OpenAiClient::new(config.api_key.clone(), config.base_url.clone());
        Ok(Self {
            config,
            model: Box::new(model),
        })
    }

    /// Builds an extractor over a caller-supplied model transport.
    pub fn with_model(config: ExtractorConfig, model: Box<dyn LanguageModel>) -> Self {
        Self { config, model }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Effective model for text-routed documents.
    pub fn text_model(&self) -> &str {
        self.config.effective_text_model()
    }

    /// Effective model for image-routed documents.
    pub fn vision_model(&self) -> &str {
        self.config.effective_vision_model()
    }

    pub fn set_text_model(&mut self, model: impl Into<String>) {
        self.config.set_text_model(model);
    }

    pub fn set_vision_model(&mut self, model: impl Into<String>) {
        self.config.set_vision_model(model);
    }

    /// Sets both model slots at once.
    pub fn set_models(&mut self, model: impl Into<String>) {
        self.config.set_models(model);
    }

    /// Runs one extraction: validate, parse, route, call the model once, and
    /// parse its response. No retries happen anywhere on this path.
    pub async fn extract<T: DeserializeOwned>(
        &self,
        request: ExtractionRequest,
    ) -> Result<ExtractionResult<T>, ExtractError> {
        let source = resolve_source(request.pdf_path, request.pdf_buffer)?;
        schema::validate(&request.schema)
            .map_err(|e| ExtractError::InvalidSchema(e.to_string()))?;

        let parsed = pipeline::parse(&source, self.config.text_threshold).await?;
        let (mode, messages) = build_messages(&parsed.content, self.config.vision_enabled)?;
        let selection = select::select(&self.config, mode, request.temperature);

        info!(
            model = %selection.model,
            mode = ?mode,
            pages = parsed.page_count,
            "invoking model for extraction"
        );

        let outcome = self
            .model
            .complete(ChatRequest {
                model: selection.model,
                system_prompt: selection.system_prompt,
                messages,
                response_schema: request.schema,
                temperature: selection.temperature,
                max_output_tokens: request.max_output_tokens,
            })
            .await
            .map_err(|e| ExtractError::ExtractionFailed(format!("model call failed: {e}")))?;

        let content = match outcome.content {
            Some(content) if !content.trim().is_empty() => content,
            _ => return Err(ExtractError::EmptyModelResponse),
        };

        debug!(bytes = content.len(), model = %outcome.model, "parsing model response");

        // A schema-constrained response that fails to parse is a contract
        // violation by the capability, not a recoverable input problem.
        let data = serde_json::from_str::<T>(&content).map_err(|e| {
            ExtractError::ExtractionFailed(format!("failed to parse model response as JSON: {e}"))
        })?;

        Ok(ExtractionResult {
            data,
            tokens_used: outcome.total_tokens,
            model_used: outcome.model,
        })
    }
}

fn resolve_source(
    pdf_path: Option<PathBuf>,
    pdf_buffer: Option<Vec<u8>>,
) -> Result<PdfSource, ExtractError> {
    match (pdf_path, pdf_buffer) {
        (Some(path), None) => Ok(PdfSource::Path(path)),
        (None, Some(bytes)) => Ok(PdfSource::Bytes(bytes)),
        _ => Err(ExtractError::MissingSource),
    }
}

fn build_messages(
    content: &ParsedContent,
    vision_enabled: bool,
) -> Result<(ExtractionMode, Vec<ChatMessage>), ExtractError> {
    match content {
        ParsedContent::Text { body } => {
            let message = ChatMessage::user_text(format!("{TEXT_INSTRUCTION}\n\n{body}"));
            Ok((ExtractionMode::Text, vec![message]))
        }
        ParsedContent::Images { pages } => {
            if !vision_enabled {
                return Err(ExtractError::VisionDisabled);
            }
            if pages.is_empty() {
                return Err(ExtractError::ExtractionFailed(
                    "document yielded no extractable text and no page images".to_string(),
                ));
            }
            let mut parts = Vec::with_capacity(pages.len() + 1);
            parts.push(ContentPart::text(VISION_INSTRUCTION));
            for page in pages {
                parts.push(ContentPart::png_image(&page.image_bytes));
            }
            Ok((ExtractionMode::Vision, vec![ChatMessage::user_parts(parts)]))
        }
    }
}
