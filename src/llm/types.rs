//! Chat-completions wire types for OpenAI-compatible endpoints, including the
//! multipart vision content and json-schema response constraint.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Literal prefix the model-calling API expects for inline PNG attachments.
const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Encodes PNG bytes as a data URL suitable for an `image_url` part.
pub fn png_data_url(image_bytes: &[u8]) -> String {
    format!("{PNG_DATA_URL_PREFIX}{}", BASE64.encode(image_bytes))
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: MessageContent,
}

impl ChatMessage {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn user_parts(parts: Vec<ContentPart>) -> Self {
        Self {
            role: "user".to_string(),
            content: MessageContent::Parts(parts),
        }
    }
}

/// Either a plain string or the multipart form used for vision requests.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrlPart },
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageUrlPart {
    pub url: String,
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text { text: text.into() }
    }

    pub fn png_image(image_bytes: &[u8]) -> Self {
        ContentPart::ImageUrl {
            image_url: ImageUrlPart {
                url: png_data_url(image_bytes),
            },
        }
    }
}

/// One schema-constrained completion request, transport-agnostic.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub model: String,
    /// `None` suppresses the system message entirely.
    pub system_prompt: Option<String>,
    pub messages: Vec<ChatMessage>,
    /// JSON schema the response content must conform to.
    pub response_schema: Value,
    pub temperature: f32,
    pub max_output_tokens: Option<u32>,
}

/// What a model call produced.
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    pub content: Option<String>,
    pub total_tokens: Option<u32>,
    pub model: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    #[serde(rename = "max_tokens", skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    pub response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
pub(crate) struct ResponseFormat {
    #[serde(rename = "type")]
    pub format_type: String,
    pub json_schema: JsonSchemaFormat,
}

#[derive(Debug, Serialize)]
pub(crate) struct JsonSchemaFormat {
    pub name: String,
    pub schema: Value,
    pub strict: bool,
}

impl ResponseFormat {
    pub fn json_schema(schema: Value) -> Self {
        Self {
            format_type: "json_schema".to_string(),
            json_schema: JsonSchemaFormat {
                name: "extraction".to_string(),
                schema,
                strict: true,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
    #[serde(default)]
    pub usage: Option<Usage>,
    pub model: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatChoice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Usage {
    #[serde(default)]
    pub total_tokens: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn png_data_url_carries_exact_prefix() {
        let url = png_data_url(&[1, 2, 3, 4]);
        assert!(url.starts_with("data:image/png;base64,"));
        assert_eq!(
            url,
            format!("data:image/png;base64,{}", BASE64.encode([1, 2, 3, 4]))
        );
    }

    #[test]
    fn text_message_serializes_as_plain_string_content() {
        let message = ChatMessage::user_text("hello");
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value, json!({"role": "user", "content": "hello"}));
    }

    #[test]
    fn multipart_message_serializes_tagged_parts() {
        let message = ChatMessage::user_parts(vec![
            ContentPart::text("look at this"),
            ContentPart::png_image(&[0xAA]),
        ]);
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(
            value["content"][0],
            json!({"type": "text", "text": "look at this"})
        );
        assert_eq!(value["content"][1]["type"], "image_url");
        let url = value["content"][1]["image_url"]["url"].as_str().unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn completion_request_serializes_schema_constraint() {
        let request = ChatCompletionRequest {
            model: "gpt-4o-mini".to_string(),
            messages: vec![ChatMessage::user_text("extract")],
            temperature: 0.0,
            max_tokens: None,
            response_format: ResponseFormat::json_schema(json!({"type": "object"})),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["response_format"]["type"], "json_schema");
        assert_eq!(
            value["response_format"]["json_schema"]["schema"]["type"],
            "object"
        );
        assert_eq!(value["response_format"]["json_schema"]["strict"], true);
        assert!(value.get("max_tokens").is_none());
    }

    #[test]
    fn completion_response_parses_usage_and_content() {
        let raw = json!({
            "id": "chatcmpl-1",
            "model": "gpt-4o-mini-2024-07-18",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "{\"a\":1}"}}],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        });
        let response: ChatCompletionResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(response.model, "gpt-4o-mini-2024-07-18");
        assert_eq!(response.usage.unwrap().total_tokens, Some(15));
        assert_eq!(response.choices[0].message.content.as_deref(), Some("{\"a\":1}"));
    }
}
