use async_trait::async_trait;
use reqwest::{header, Client};
use thiserror::Error;
use tracing::{debug, error};

use super::types::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ChatOutcome, ChatRequest,
    ResponseFormat,
};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("response decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The outbound model-calling capability.
///
/// The crate ships [`OpenAiClient`]; callers (and tests) may substitute any
/// other transport that honors the schema-constrained contract.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, request: ChatRequest) -> Result<ChatOutcome, LlmError>;
}

/// Chat-completions client for OpenAI-compatible endpoints.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Self {
            client,
            api_key,
            base_url,
        }
    }

    fn build_body(request: ChatRequest) -> ChatCompletionRequest {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        if let Some(prompt) = request.system_prompt {
            messages.push(ChatMessage::system(prompt));
        }
        messages.extend(request.messages);

        ChatCompletionRequest {
            model: request.model,
            messages,
            temperature: request.temperature,
            max_tokens: request.max_output_tokens,
            response_format: ResponseFormat::json_schema(request.response_schema),
        }
    }
}

#[async_trait]
impl LanguageModel for OpenAiClient {
    async fn complete(&self, request: ChatRequest) -> Result<ChatOutcome, LlmError> {
        let body = Self::build_body(request);
        let endpoint = format!("{}/chat/completions", self.base_url);

        debug!(model = %body.model, messages = body.messages.len(), "sending chat completion request");

        let response = self
            .client
            .post(&endpoint)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            error!("chat completion API error: status {status}");
            return Err(LlmError::Api(format!(
                "HTTP Status: {status}, body: {}",
                detail.trim()
            )));
        }

        let response_text = response.text().await?;
        debug!(bytes = response_text.len(), "received chat completion response");

        let parsed = serde_json::from_str::<ChatCompletionResponse>(&response_text)?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content);

        Ok(ChatOutcome {
            content,
            total_tokens: parsed.usage.and_then(|usage| usage.total_tokens),
            model: parsed.model,
        })
    }
}
