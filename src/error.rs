use thiserror::Error;

/// Errors that can occur while generating, parsing or consolidating recipes
#[derive(Error, Debug)]
pub enum RecipeError {
    /// Recipe name was empty after sanitization
    #[error("Recipe name is invalid after processing: {0:?}")]
    InvalidName(String),

    /// Generation service refused the request on content-policy grounds
    #[error("Recipe generation was blocked by safety filters, try phrasing the recipe name differently: {0}")]
    UpstreamSafety(String),

    /// Generation service reply did not carry the expected text payload
    #[error("Generation service returned an unexpected reply: {0}")]
    UpstreamShape(String),

    /// Generation service reported an error unrelated to content policy
    #[error("Generation service error: {0}")]
    Upstream(String),

    /// Generation service is rate limiting or failing on its side
    #[error("Generation service is temporarily unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Repaired reply text is still not valid JSON
    #[error("Failed to parse ingredients from generated text: {source}")]
    Parse {
        raw: String,
        #[source]
        source: serde_json::Error,
    },

    /// Reply parsed as JSON but is not an array of ingredients
    #[error("Generated text is not an ingredient array")]
    Shape { raw: String },

    /// Consolidation input exceeds the configured cap
    #[error("Too many recipes to consolidate: {count} given, at most {max} allowed")]
    TooManyRecipes { count: usize, max: usize },

    /// Failed to reach the generation service
    #[error("Failed to communicate with the generation service: {0}")]
    Fetch(#[from] reqwest::Error),

    /// Provider could not be created from configuration
    #[error("Provider error: {0}")]
    Provider(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Reading recipe files failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted recipe records could not be decoded
    #[error("Invalid recipe record: {0}")]
    InvalidRecord(#[source] serde_json::Error),
}

impl RecipeError {
    /// Whether sending the same request again may succeed.
    ///
    /// Only transient upstream faults qualify. Malformed generated text is
    /// never retryable. The decision to retry belongs to the caller.
    pub fn is_retryable(&self) -> bool {
        match self {
            RecipeError::UpstreamShape(_) | RecipeError::UpstreamUnavailable(_) => true,
            RecipeError::Fetch(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// Raw generated text kept for diagnostics, never shown to end users.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            RecipeError::Parse { raw, .. } | RecipeError::Shape { raw } => Some(raw),
            _ => None,
        }
    }
}
