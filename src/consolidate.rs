//! Merging ingredient lists from several recipes into one shopping list.

use std::collections::HashMap;

use log::debug;

use crate::error::RecipeError;
use crate::model::{ConsolidatedIngredient, Ingredient, Recipe};

/// Default cap on the number of recipes in one consolidation.
pub const DEFAULT_MAX_RECIPES: usize = 4;

/// Case and whitespace insensitive `(name, unit)` pair.
///
/// A missing unit is the empty unit, distinct from every named unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConsolidationKey {
    pub name: String,
    pub unit: String,
}

impl ConsolidationKey {
    pub fn of(ingredient: &Ingredient) -> Self {
        ConsolidationKey {
            name: ingredient.name.trim().to_lowercase(),
            unit: ingredient
                .unit
                .as_deref()
                .map(|unit| unit.trim().to_lowercase())
                .unwrap_or_default(),
        }
    }
}

fn finite(quantity: Option<f64>) -> Option<f64> {
    quantity.filter(|q| q.is_finite())
}

/// Merge all ingredients of `recipes` by [`ConsolidationKey`], in first-seen order.
///
/// Quantities of matching ingredients are summed. An absent quantity adds
/// nothing, and a present one seeds an absent total. Source recipes are
/// not modified.
pub fn consolidate(recipes: &[Recipe]) -> Vec<ConsolidatedIngredient> {
    let mut positions: HashMap<ConsolidationKey, usize> = HashMap::new();
    let mut merged: Vec<ConsolidatedIngredient> = Vec::new();

    for ingredient in recipes.iter().flat_map(|recipe| &recipe.ingredients) {
        let key = ConsolidationKey::of(ingredient);
        let quantity = finite(ingredient.quantity);

        match positions.get(&key) {
            Some(&index) => {
                if let Some(q) = quantity {
                    let entry = &mut merged[index];
                    entry.quantity = Some(entry.quantity.map_or(q, |total| total + q));
                }
            }
            None => {
                positions.insert(key, merged.len());
                merged.push(ConsolidatedIngredient {
                    name: ingredient.name.trim().to_string(),
                    unit: ingredient
                        .unit
                        .as_deref()
                        .map(str::trim)
                        .filter(|unit| !unit.is_empty())
                        .map(str::to_string),
                    quantity,
                });
            }
        }
    }

    debug!(
        "Consolidated {} recipes into {} ingredients",
        recipes.len(),
        merged.len()
    );
    merged
}

/// [`consolidate`] with the recipe cap enforced before any merge work.
pub fn consolidate_bounded(
    recipes: &[Recipe],
    max_recipes: usize,
) -> Result<Vec<ConsolidatedIngredient>, RecipeError> {
    if recipes.len() > max_recipes {
        return Err(RecipeError::TooManyRecipes {
            count: recipes.len(),
            max: max_recipes,
        });
    }
    Ok(consolidate(recipes))
}
