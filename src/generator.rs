//! Generation of a complete recipe from a free-form name.

use log::{debug, info};

use crate::config::PortalConfig;
use crate::error::RecipeError;
use crate::model::{Ingredient, Recipe, RecipeId};
use crate::normalize::normalize_recipe_name;
use crate::providers::{build_prompt, GenerationProvider, ProviderFactory};
use crate::{repair, validate};

/// Parse and validate generated reply text into ingredients.
pub fn parse_generated_ingredients(raw_response_text: &str) -> Result<Vec<Ingredient>, RecipeError> {
    let candidates = repair::parse(raw_response_text)?;
    let ingredients = validate::validate(&candidates);
    debug!(
        "Kept {} of {} generated ingredient candidates",
        ingredients.len(),
        candidates.len()
    );
    Ok(ingredients)
}

pub struct RecipeGenerator {
    provider: Box<dyn GenerationProvider>,
    servings: u32,
}

impl RecipeGenerator {
    pub fn new(provider: Box<dyn GenerationProvider>, servings: u32) -> Self {
        RecipeGenerator { provider, servings }
    }

    /// Build a generator around the configured default provider
    pub fn from_config(config: &PortalConfig) -> Result<Self, RecipeError> {
        Ok(Self::new(
            ProviderFactory::get_default_provider(config)?,
            config.default_servings,
        ))
    }

    /// Generate a recipe for `raw_name`.
    ///
    /// Returns a complete recipe or an error, never a partial one. The
    /// provider call is the only await point, so dropping the future
    /// leaves nothing behind.
    pub async fn generate(&self, raw_name: &str) -> Result<Recipe, RecipeError> {
        let name = normalize_recipe_name(raw_name)?;
        let prompt = build_prompt(&name, self.servings);

        info!(
            "Generating ingredients for recipe {:?} with {}",
            name,
            self.provider.provider_name()
        );
        let text = self.provider.generate(&prompt).await?;
        let ingredients = parse_generated_ingredients(&text)?;

        let recipe = Recipe {
            id: RecipeId::new(),
            name,
            servings: self.servings,
            ingredients,
        };
        info!(
            "Generated recipe {:?} ({}) with {} ingredients",
            recipe.name,
            recipe.id,
            recipe.ingredients.len()
        );
        Ok(recipe)
    }
}
