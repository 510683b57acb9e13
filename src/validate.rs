use log::warn;
use serde_json::Value;

use crate::model::{parse_quantity, Ingredient};
use crate::normalize::normalize_ingredient_name;
use crate::repair::RawCandidate;

/// Turn one raw candidate into an ingredient, or `None` if it has no usable name.
///
/// Quantity and unit are carried over as given, except that a quantity which
/// is not a finite non-negative number is recorded as absent.
pub fn validate_candidate(candidate: &RawCandidate) -> Option<Ingredient> {
    let raw_name = candidate.get("name").and_then(Value::as_str)?;

    let Some(name) = normalize_ingredient_name(raw_name) else {
        warn!(
            "Skipping ingredient with original name {:?} as it became empty after processing",
            raw_name
        );
        return None;
    };

    Some(Ingredient {
        name,
        quantity: candidate.get("quantity").and_then(parse_quantity),
        unit: candidate
            .get("unit")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}

/// Filter-map candidates into ingredients, preserving order.
///
/// An empty result is valid and distinct from a parse failure upstream.
pub fn validate(candidates: &[RawCandidate]) -> Vec<Ingredient> {
    candidates.iter().filter_map(validate_candidate).collect()
}
