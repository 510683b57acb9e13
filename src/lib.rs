//! Recipe name to ingredient list generation and shopping list consolidation.
//!
//! # Example
//! ```
//! use recipe_portal::{consolidate, normalize_recipe_name, Ingredient, Recipe};
//!
//! assert_eq!(normalize_recipe_name("  ChIcKeN CURRY!! ").unwrap(), "Chicken Curry");
//!
//! let curry = Recipe::new("curry", 8, vec![Ingredient::with_amount("tomato", 200.0, "grams")]).unwrap();
//! let salad = Recipe::new("salad", 8, vec![Ingredient::with_amount("Tomato", 300.0, "grams")]).unwrap();
//! let list = consolidate(&[curry, salad], 4).unwrap();
//! assert_eq!(list[0].quantity, Some(500.0));
//! ```

pub mod config;
pub mod consolidate;
pub mod error;
pub mod generator;
pub mod model;
pub mod normalize;
pub mod providers;
pub mod repair;
pub mod validate;

pub use crate::config::{PortalConfig, ProviderConfig};
pub use crate::consolidate::{ConsolidationKey, DEFAULT_MAX_RECIPES};
pub use crate::error::RecipeError;
pub use crate::generator::{parse_generated_ingredients, RecipeGenerator};
pub use crate::model::{ConsolidatedIngredient, Ingredient, Recipe, RecipeId, DEFAULT_SERVINGS};
pub use crate::normalize::{normalize_recipe_name, sanitize, title_case};

/// Build the prompt sent to the generation service for a canonical name.
pub fn build_ingredient_generation_request(canonical_name: &str, servings: u32) -> String {
    providers::build_prompt(canonical_name, servings)
}

/// Merge the ingredients of at most `max_recipes` recipes into one list.
///
/// Fails with [`RecipeError::TooManyRecipes`] before any merge work when
/// the input is over the cap.
pub fn consolidate(
    recipes: &[Recipe],
    max_recipes: usize,
) -> Result<Vec<ConsolidatedIngredient>, RecipeError> {
    crate::consolidate::consolidate_bounded(recipes, max_recipes)
}

/// Generate a recipe using configuration loaded from file and environment.
pub async fn generate_recipe(raw_name: &str) -> Result<Recipe, RecipeError> {
    let config = PortalConfig::load()?;
    RecipeGenerator::from_config(&config)?
        .generate(raw_name)
        .await
}
