use crate::config::ProviderConfig;
use crate::error::RecipeError;
use crate::providers::{build_client, classify_status, GenerationProvider};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider from configuration
    pub fn new(config: &ProviderConfig, timeout_secs: u64) -> Result<Self, RecipeError> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            RecipeError::Provider("OpenAI API key not found in configuration".to_string())
        })?;

        Ok(OpenAIProvider {
            client: build_client(timeout_secs)?,
            api_key,
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: config
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        OpenAIProvider {
            client: Client::new(),
            api_key,
            base_url,
            model,
            temperature: 0.4,
            max_tokens: 2000,
        }
    }
}

/// Classify a chat completion reply and pull out its text.
pub(crate) fn extract_text(body: &Value) -> Result<String, RecipeError> {
    if let Some(error) = body.get("error") {
        // Some proxies send the error as a bare string
        let message = error["message"]
            .as_str()
            .or_else(|| error.as_str())
            .unwrap_or("Unknown error")
            .to_string();
        if error["code"].as_str() == Some("content_policy_violation") {
            return Err(RecipeError::UpstreamSafety(message));
        }
        return Err(RecipeError::Upstream(message));
    }

    let choice = &body["choices"][0];
    if choice["finish_reason"].as_str() == Some("content_filter") {
        return Err(RecipeError::UpstreamSafety(
            "completion stopped by content filter".to_string(),
        ));
    }

    choice["message"]["content"]
        .as_str()
        .map(|text| text.trim().to_string())
        .ok_or_else(|| RecipeError::UpstreamShape("OpenAI reply has no message content".to_string()))
}

#[async_trait]
impl GenerationProvider for OpenAIProvider {
    fn provider_name(&self) -> &str {
        "openai"
    }

    async fn generate(&self, prompt: &str) -> Result<String, RecipeError> {
        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&json!({
                "model": self.model,
                "messages": [
                    {"role": "user", "content": prompt}
                ],
                "temperature": self.temperature,
                "max_tokens": self.max_tokens
            }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!("OpenAI response ({}): {}", status, body);

        let response_body: Value = serde_json::from_str(&body).map_err(|_| {
            RecipeError::UpstreamShape(format!("OpenAI reply with status {} is not JSON", status))
        })?;

        classify_status(status, extract_text(&response_body))
    }
}
