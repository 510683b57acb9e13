use crate::config::{PortalConfig, ProviderConfig};
use crate::error::RecipeError;
use crate::providers::{GenerationProvider, GoogleProvider, OpenAIProvider};

pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a provider instance from configuration
    pub fn create(
        provider_name: &str,
        config: &ProviderConfig,
        timeout_secs: u64,
    ) -> Result<Box<dyn GenerationProvider>, RecipeError> {
        if !config.enabled {
            return Err(RecipeError::Provider(format!(
                "Provider '{}' is not enabled in configuration",
                provider_name
            )));
        }

        match provider_name {
            "google" => Ok(Box::new(GoogleProvider::new(config, timeout_secs)?)),
            "openai" => Ok(Box::new(OpenAIProvider::new(config, timeout_secs)?)),
            _ => Err(RecipeError::Provider(format!(
                "Unknown provider: {} (available: {})",
                provider_name,
                Self::available_providers().join(", ")
            ))),
        }
    }

    /// Get the default provider from configuration
    pub fn get_default_provider(
        config: &PortalConfig,
    ) -> Result<Box<dyn GenerationProvider>, RecipeError> {
        let provider_name = &config.default_provider;
        let provider_config = config.providers.get(provider_name).ok_or_else(|| {
            RecipeError::Provider(format!(
                "Default provider '{}' not found in configuration",
                provider_name
            ))
        })?;

        Self::create(provider_name, provider_config, config.timeout)
    }

    /// List all available provider names
    pub fn available_providers() -> Vec<&'static str> {
        vec!["google", "openai"]
    }
}
