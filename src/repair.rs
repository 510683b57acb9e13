//! Recovery of an ingredient array from loosely formatted generated text.
//!
//! Repair happens in two stages. [`repair`] applies lenient textual fixes and
//! reports which ones it needed, then [`parse_candidates`] does a strict JSON
//! parse of the result.
//!
//! Known limitation: quote rewriting is a global substitution. Single-quoted
//! text whose values contain apostrophes (`'chef's knife'`) cannot be
//! recovered and fails with [`RecipeError::Parse`].

use log::debug;
use serde_json::Value;

use crate::error::RecipeError;

/// An unvalidated array element from the generated reply
pub type RawCandidate = Value;

/// Outcome of the lenient textual stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repaired {
    pub text: String,
    pub stripped_fence: bool,
    pub rewrote_quotes: bool,
}

impl Repaired {
    /// Whether any formatting noise had to be removed.
    pub fn was_repaired(&self) -> bool {
        self.stripped_fence || self.rewrote_quotes
    }
}

/// Removes a markdown code fence (```` ```json ```` or bare ```` ``` ````).
///
/// The opening and closing fences are stripped independently, so a reply
/// carrying only one of them is still cleaned. Returns `None` when neither
/// is present.
pub fn strip_code_fence(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    let opened = trimmed.strip_prefix("```").map(|rest| {
        rest.strip_prefix("json")
            .or_else(|| rest.strip_prefix("JSON"))
            .unwrap_or(rest)
    });
    let rest = opened.unwrap_or(trimmed);
    let closed = rest.strip_suffix("```");

    if opened.is_none() && closed.is_none() {
        return None;
    }
    Some(closed.unwrap_or(rest).trim())
}

/// Lenient textual stage.
///
/// Text that already parses as JSON is left alone apart from fence removal;
/// otherwise every single quote is rewritten to a double quote.
pub fn repair(raw: &str) -> Repaired {
    let (text, stripped_fence) = match strip_code_fence(raw) {
        Some(inner) => (inner, true),
        None => (raw.trim(), false),
    };

    let rewrote_quotes =
        text.contains('\'') && serde_json::from_str::<Value>(text).is_err();
    let text = if rewrote_quotes {
        text.replace('\'', "\"")
    } else {
        text.to_string()
    };

    Repaired {
        text,
        stripped_fence,
        rewrote_quotes,
    }
}

/// Strict structural stage: the repaired text must be a JSON array.
pub fn parse_candidates(repaired: &Repaired, raw: &str) -> Result<Vec<RawCandidate>, RecipeError> {
    let value: Value = serde_json::from_str(&repaired.text).map_err(|source| RecipeError::Parse {
        raw: raw.to_string(),
        source,
    })?;

    match value {
        Value::Array(items) => Ok(items),
        _ => Err(RecipeError::Shape {
            raw: raw.to_string(),
        }),
    }
}

/// Recover the raw candidate array from generated text.
pub fn parse(raw: &str) -> Result<Vec<RawCandidate>, RecipeError> {
    let repaired = repair(raw);
    if repaired.was_repaired() {
        debug!(
            "Repaired generated text (stripped fence: {}, rewrote quotes: {})",
            repaired.stripped_fence, repaired.rewrote_quotes
        );
    }
    parse_candidates(&repaired, raw)
}
