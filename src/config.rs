use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

use crate::consolidate::DEFAULT_MAX_RECIPES;
use crate::model::DEFAULT_SERVINGS;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct PortalConfig {
    /// Provider used for ingredient generation
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Map of provider name to provider configuration
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    /// Serving count requested from the generation service
    #[serde(default = "default_servings")]
    pub default_servings: u32,
    /// Maximum number of recipes merged into one shopping list
    #[serde(default = "default_max_recipes")]
    pub max_recipes: usize,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

/// Configuration for a specific generation provider
#[derive(Deserialize, Clone)]
pub struct ProviderConfig {
    /// Whether this provider is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Model identifier; each provider has its own default
    pub model: Option<String>,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// API key for authentication
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for custom or proxy endpoints)
    pub base_url: Option<String>,
}

// Keeps credentials out of debug logs
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("enabled", &self.enabled)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            default_provider: default_provider(),
            providers: HashMap::new(),
            default_servings: default_servings(),
            max_recipes: default_max_recipes(),
            timeout: default_timeout(),
        }
    }
}

// Default value functions
fn default_provider() -> String {
    "google".to_string()
}

fn default_servings() -> u32 {
    DEFAULT_SERVINGS
}

fn default_max_recipes() -> usize {
    DEFAULT_MAX_RECIPES
}

fn default_timeout() -> u64 {
    30
}

fn default_enabled() -> bool {
    true
}

fn default_temperature() -> f32 {
    0.4
}

fn default_max_tokens() -> u32 {
    2000
}

impl PortalConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_PORTAL__ prefix
    /// 2. recipe_portal.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_PORTAL__PROVIDERS__GOOGLE__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("recipe_portal").required(false))
            .add_source(
                Environment::with_prefix("RECIPE_PORTAL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
