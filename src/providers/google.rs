use crate::config::ProviderConfig;
use crate::error::RecipeError;
use crate::providers::{build_client, classify_status, GenerationProvider};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const SAFETY_FINISH_REASONS: &[&str] = &["SAFETY", "PROHIBITED_CONTENT", "BLOCKLIST", "SPII"];

pub struct GoogleProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl GoogleProvider {
    /// Create a new Google Gemini provider from configuration
    pub fn new(config: &ProviderConfig, timeout_secs: u64) -> Result<Self, RecipeError> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            RecipeError::Provider("Google API key not found in configuration".to_string())
        })?;

        Ok(GoogleProvider {
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
        GoogleProvider {
            client: Client::new(),
            api_key,
            base_url,
            model,
            temperature: 0.4,
            max_tokens: 2000,
        }
    }
}

/// Classify a Gemini `generateContent` reply and pull out its text.
pub(crate) fn extract_text(body: &Value) -> Result<String, RecipeError> {
    if let Some(error) = body.get("error") {
        let message = error["message"].as_str().unwrap_or("Unknown error").to_string();
        if message.contains("Content is blocked") {
            return Err(RecipeError::UpstreamSafety(message));
        }
        let code = error["code"].as_i64().unwrap_or(0);
        return Err(RecipeError::Upstream(format!("({}) {}", code, message)));
    }

    if let Some(reason) = body["promptFeedback"]["blockReason"].as_str() {
        return Err(RecipeError::UpstreamSafety(format!(
            "prompt blocked: {}",
            reason
        )));
    }

    let candidate = &body["candidates"][0];
    match candidate["content"]["parts"][0]["text"].as_str() {
        Some(text) => Ok(text.trim().to_string()),
        None => match candidate["finishReason"].as_str() {
            Some(reason) if SAFETY_FINISH_REASONS.contains(&reason) => Err(
                RecipeError::UpstreamSafety(format!("candidate finished with {}", reason)),
            ),
            _ => Err(RecipeError::UpstreamShape(
                "Gemini reply has no candidate text".to_string(),
            )),
        },
    }
}

#[async_trait]
impl GenerationProvider for GoogleProvider {
    fn provider_name(&self) -> &str {
        "google"
    }

    async fn generate(&self, prompt: &str) -> Result<String, RecipeError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&json!({
                "contents": [{
                    "parts": [{
                        "text": prompt
                    }]
                }],
                "generationConfig": {
                    "temperature": self.temperature,
                    "maxOutputTokens": self.max_tokens
                }
            }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!("Google Gemini response ({}): {}", status, body);

        let response_body: Value = serde_json::from_str(&body).map_err(|_| {
            RecipeError::UpstreamShape(format!("Gemini reply with status {} is not JSON", status))
        })?;

        classify_status(status, extract_text(&response_body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[test]
    fn test_provider_name() {
        let config = ProviderConfig {
            enabled: true,
            model: None,
            temperature: 0.4,
            max_tokens: 2000,
            api_key: Some("test-key".to_string()),
            base_url: None,
        };

        let provider = GoogleProvider::new(&config, 30).unwrap();
        assert_eq!(provider.provider_name(), "google");
        assert_eq!(provider.model, DEFAULT_MODEL);
        assert_eq!(provider.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_missing_api_key() {
        let config = ProviderConfig {
            enabled: true,
            model: None,
            temperature: 0.4,
            max_tokens: 2000,
            api_key: None,
            base_url: None,
        };

        assert!(matches!(
            GoogleProvider::new(&config, 30),
            Err(RecipeError::Provider(_))
        ));
    }

    #[test]
    fn test_extract_text() {
        let body = json!({
            "candidates": [{"content": {"parts": [{"text": "  [{'name':'salt'}]\n"}]}}]
        });
        assert_eq!(extract_text(&body).unwrap(), "[{'name':'salt'}]");
    }

    #[test]
    fn test_extract_text_classifies_safety() {
        let blocked = json!({"error": {"code": 400, "message": "Content is blocked by policy"}});
        assert!(matches!(
            extract_text(&blocked),
            Err(RecipeError::UpstreamSafety(_))
        ));

        let feedback = json!({"promptFeedback": {"blockReason": "SAFETY"}});
        assert!(matches!(
            extract_text(&feedback),
            Err(RecipeError::UpstreamSafety(_))
        ));

        let finished = json!({"candidates": [{"finishReason": "SAFETY"}]});
        assert!(matches!(
            extract_text(&finished),
            Err(RecipeError::UpstreamSafety(_))
        ));
    }

    #[test]
    fn test_extract_text_classifies_other_failures() {
        let quota = json!({"error": {"code": 429, "message": "Resource has been exhausted"}});
        match extract_text(&quota) {
            Err(RecipeError::Upstream(message)) => assert!(message.contains("429")),
            other => panic!("unexpected result: {:?}", other),
        }

        let empty = json!({"candidates": []});
        assert!(matches!(
            extract_text(&empty),
            Err(RecipeError::UpstreamShape(_))
        ));

        let truncated = json!({"candidates": [{"finishReason": "MAX_TOKENS"}]});
        assert!(matches!(
            extract_text(&truncated),
            Err(RecipeError::UpstreamShape(_))
        ));
    }

    #[tokio::test]
    async fn test_generate_sends_key_in_header() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-1.5-flash:generateContent")
            .match_header("x-goog-api-key", "secret-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates": [{"content": {"parts": [{"text": "[]"}]}}]}"#)
            .create_async()
            .await;

        let provider = GoogleProvider::with_base_url(
            "secret-key".to_string(),
            server.url(),
            "gemini-1.5-flash".to_string(),
        );
        assert_eq!(provider.generate("prompt").await.unwrap(), "[]");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_transport_error_does_not_expose_key() {
        // Nothing listens on port 1
        let provider = GoogleProvider::with_base_url(
            "secret-key".to_string(),
            "http://127.0.0.1:1".to_string(),
            "gemini-1.5-flash".to_string(),
        );

        let err = provider.generate("prompt").await.unwrap_err();
        assert!(matches!(err, RecipeError::Fetch(_)));
        assert!(!err.to_string().contains("secret-key"));
        assert!(!format!("{:?}", err).contains("secret-key"));
    }

    #[tokio::test]
    async fn test_overloaded_service_is_retryable() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/v1beta/models/gemini-1.5-flash:generateContent")
            .with_status(503)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": {"code": 503, "message": "The model is overloaded"}}"#)
            .create_async()
            .await;

        let provider = GoogleProvider::with_base_url(
            "secret-key".to_string(),
            server.url(),
            "gemini-1.5-flash".to_string(),
        );
        let err = provider.generate("prompt").await.unwrap_err();
        assert!(matches!(err, RecipeError::UpstreamUnavailable(_)));
        assert!(err.is_retryable());
    }
}
