use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::RecipeError;
use crate::normalize::normalize_recipe_name;

/// Serving count used when a recipe does not state one.
pub const DEFAULT_SERVINGS: u32 = 8;

/// Opaque recipe identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(String);

impl RecipeId {
    pub fn new() -> Self {
        RecipeId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RecipeId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for RecipeId {
    fn from(id: String) -> Self {
        RecipeId(id)
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    /// Amount in `unit`; `None` means "to taste" or unspecified
    #[serde(
        default,
        deserialize_with = "lenient_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl Ingredient {
    pub fn new(name: impl Into<String>) -> Self {
        Ingredient {
            name: name.into(),
            quantity: None,
            unit: None,
        }
    }

    pub fn with_amount(name: impl Into<String>, quantity: f64, unit: impl Into<String>) -> Self {
        Ingredient {
            name: name.into(),
            quantity: Some(quantity),
            unit: Some(unit.into()),
        }
    }
}

/// A named recipe. Deserialized records must have a name that survives
/// normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RecipeRecord")]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    pub servings: u32,
    pub ingredients: Vec<Ingredient>,
}

// Persisted shape of a recipe, checked before it becomes a `Recipe`
#[derive(Deserialize)]
struct RecipeRecord {
    #[serde(alias = "_id", default)]
    id: RecipeId,
    name: String,
    #[serde(default = "default_servings")]
    servings: u32,
    #[serde(default)]
    ingredients: Vec<Ingredient>,
}

fn default_servings() -> u32 {
    DEFAULT_SERVINGS
}

impl TryFrom<RecipeRecord> for Recipe {
    type Error = RecipeError;

    fn try_from(record: RecipeRecord) -> Result<Self, Self::Error> {
        normalize_recipe_name(&record.name)?;
        Ok(Recipe {
            id: record.id,
            name: record.name,
            servings: record.servings,
            ingredients: record.ingredients,
        })
    }
}

impl Recipe {
    /// Create a recipe with a fresh id, normalizing the name.
    ///
    /// Fails with [`RecipeError::InvalidName`] when nothing is left of the
    /// name after sanitization.
    pub fn new(
        raw_name: &str,
        servings: u32,
        ingredients: Vec<Ingredient>,
    ) -> Result<Self, RecipeError> {
        Ok(Recipe {
            id: RecipeId::new(),
            name: normalize_recipe_name(raw_name)?,
            servings,
            ingredients,
        })
    }
}

/// One line of a shopping list: every ingredient sharing a consolidation key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsolidatedIngredient {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
}

/// Read an untrusted quantity as a finite, non-negative number.
///
/// Numbers are taken as is. Strings are read like a lenient float parser
/// would, using their leading numeric prefix ("200 g" is 200). Everything
/// else, and any negative or non-finite result, is `None`.
pub fn parse_quantity(value: &Value) -> Option<f64> {
    let quantity = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_leading_number(s),
        _ => None,
    }?;

    (quantity.is_finite() && quantity >= 0.0).then_some(quantity)
}

fn parse_leading_number(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }
    if digits == 0 {
        return None;
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

fn lenient_quantity<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(parse_quantity))
}
