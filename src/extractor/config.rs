use crate::pdf::classify::DEFAULT_TEXT_THRESHOLD;

/// Model the extractor falls back to when no per-modality override is set.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Extractor configuration, constructed once and read-only during extraction.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    pub api_key: String,
    /// OpenAI-compatible endpoint base; defaults to the public OpenAI API.
    pub base_url: Option<String>,
    pub default_model: String,
    /// Overrides `default_model` for text-routed documents.
    pub text_model: Option<String>,
    /// Overrides `default_model` for image-routed documents.
    pub vision_model: Option<String>,
    pub vision_enabled: bool,
    /// Minimum extractable characters for a document to route as text.
    pub text_threshold: usize,
    /// `None` uses the built-in extraction instruction; `Some("")` suppresses
    /// the system message entirely.
    pub system_prompt: Option<String>,
    pub default_temperature: f32,
}

impl ExtractorConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
            default_model: DEFAULT_MODEL.to_string(),
            text_model: None,
            vision_model: None,
            vision_enabled: true,
            text_threshold: DEFAULT_TEXT_THRESHOLD,
            system_prompt: None,
            default_temperature: 0.0,
        }
    }

    /// Model used for text-routed documents.
    pub fn effective_text_model(&self) -> &str {
        self.text_model.as_deref().unwrap_or(&self.default_model)
    }

    /// Model used for image-routed documents.
    pub fn effective_vision_model(&self) -> &str {
        self.vision_model.as_deref().unwrap_or(&self.default_model)
    }

    /// Sets the text model without disturbing the vision slot.
    pub fn set_text_model(&mut self, model: impl Into<String>) {
        self.text_model = Some(model.into());
    }

    /// Sets the vision model without disturbing the text slot.
    pub fn set_vision_model(&mut self, model: impl Into<String>) {
        self.vision_model = Some(model.into());
    }

    /// Sets both model slots to the same model.
    pub fn set_models(&mut self, model: impl Into<String>) {
        let model = model.into();
        self.text_model = Some(model.clone());
        self.vision_model = Some(model);
    }
}
