mod factory;
mod google;
mod open_ai;
mod prompt;

pub use factory::ProviderFactory;
pub use google::GoogleProvider;
pub use open_ai::OpenAIProvider;
pub use prompt::{build_prompt, INGREDIENT_PROMPT_TEMPLATE};

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::error::RecipeError;

/// Unified trait for all text generation providers
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Get the provider name (e.g., "google", "openai")
    fn provider_name(&self) -> &str;

    /// Send a prompt and return the trimmed reply text.
    ///
    /// Content-policy refusals surface as [`RecipeError::UpstreamSafety`],
    /// replies without text as [`RecipeError::UpstreamShape`].
    async fn generate(&self, prompt: &str) -> Result<String, RecipeError>;
}

fn build_client(timeout_secs: u64) -> Result<reqwest::Client, RecipeError> {
    Ok(reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()?)
}

// Rate limiting and server-side faults reported as API errors are transient.
fn classify_status(
    status: StatusCode,
    result: Result<String, RecipeError>,
) -> Result<String, RecipeError> {
    match result {
        Err(RecipeError::Upstream(message))
            if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() =>
        {
            Err(RecipeError::UpstreamUnavailable(message))
        }
        other => other,
    }
}
