//! Layered model/prompt/temperature resolution over the immutable config.

use super::config::ExtractorConfig;

/// Instruction used when the configuration leaves the system prompt unset.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a data extraction assistant. \
Extract structured data from the provided document and respond only with JSON \
that conforms to the supplied schema.";

/// Which model-calling strategy the routed content requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMode {
    Text,
    Vision,
}

/// Resolved parameters for one model call.
#[derive(Debug, Clone)]
pub struct ModelSelection {
    pub model: String,
    /// `None` means no system message is emitted at all.
    pub system_prompt: Option<String>,
    pub temperature: f32,
}

/// Resolves model name, system prompt, and temperature for a call.
///
/// Temperature precedence: per-call override, else the configured default.
/// No range validation happens here; out-of-range values pass through to the
/// model-calling capability.
pub fn select(
    config: &ExtractorConfig,
    mode: ExtractionMode,
    temperature_override: Option<f32>,
) -> ModelSelection {
    let model = match mode {
        ExtractionMode::Text => config.effective_text_model(),
        ExtractionMode::Vision => config.effective_vision_model(),
    };

    let system_prompt = match config.system_prompt.as_deref() {
        None => Some(DEFAULT_SYSTEM_PROMPT.to_string()),
        Some("") => None,
        Some(prompt) => Some(prompt.to_string()),
    };

    ModelSelection {
        model: model.to_string(),
        system_prompt,
        temperature: temperature_override.unwrap_or(config.default_temperature),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_model_serves_both_modes() {
        let config = ExtractorConfig::new("k");
        assert_eq!(select(&config, ExtractionMode::Text, None).model, "gpt-4o-mini");
        assert_eq!(select(&config, ExtractionMode::Vision, None).model, "gpt-4o-mini");
    }

    #[test]
    fn vision_override_leaves_text_model_unchanged() {
        let mut config = ExtractorConfig::new("k");
        config.vision_model = Some("gpt-4o".to_string());
        assert_eq!(select(&config, ExtractionMode::Text, None).model, "gpt-4o-mini");
        assert_eq!(select(&config, ExtractionMode::Vision, None).model, "gpt-4o");
    }

    #[test]
    fn unset_prompt_uses_default_instruction() {
        let config = ExtractorConfig::new("k");
        let selection = select(&config, ExtractionMode::Text, None);
        assert_eq!(selection.system_prompt.as_deref(), Some(DEFAULT_SYSTEM_PROMPT));
    }

    #[test]
    fn empty_prompt_suppresses_the_system_message() {
        let mut config = ExtractorConfig::new("k");
        config.system_prompt = Some(String::new());
        let selection = select(&config, ExtractionMode::Text, None);
        assert!(selection.system_prompt.is_none());
    }

    #[test]
    fn explicit_prompt_passes_through_verbatim() {
        let mut config = ExtractorConfig::new("k");
        config.system_prompt = Some("extract invoices".to_string());
        let selection = select(&config, ExtractionMode::Vision, None);
        assert_eq!(selection.system_prompt.as_deref(), Some("extract invoices"));
    }

    #[test]
    fn per_call_temperature_wins_over_default() {
        let mut config = ExtractorConfig::new("k");
        config.default_temperature = 0.2;
        assert_eq!(select(&config, ExtractionMode::Text, None).temperature, 0.2);
        assert_eq!(select(&config, ExtractionMode::Text, Some(0.9)).temperature, 0.9);
        // Out-of-range values are passed through, not validated here.
        assert_eq!(select(&config, ExtractionMode::Text, Some(7.5)).temperature, 7.5);
    }
}
