//! Sanitization and Title Case formatting for recipe and ingredient names.

use crate::error::RecipeError;

/// Removes every character that is not a letter, number, whitespace,
/// hyphen or apostrophe, then trims surrounding whitespace.
pub fn sanitize(s: &str) -> String {
    s.chars()
        .filter(|c| {
            c.is_alphabetic() || c.is_numeric() || c.is_whitespace() || *c == '-' || *c == '\''
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Lower-cases the string and capitalizes the first letter of every word.
///
/// A word is a run of letters, digits and underscores. Hyphens and
/// apostrophes both end a word, so "stir-fry" becomes "Stir-Fry" and
/// "o'brien's" becomes "O'Brien'S".
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;

    for c in s.chars().flat_map(char::to_lowercase) {
        let is_word_char = c.is_alphanumeric() || c == '_';
        if is_word_char && !in_word {
            push_capitalized(&mut out, c);
        } else {
            out.push(c);
        }
        in_word = is_word_char;
    }

    out
}

// Characters whose upper case expands to several characters (e.g. 'ß')
// stay lower case so that formatting twice gives the same result.
fn push_capitalized(out: &mut String, c: char) {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => out.push(u),
        _ => out.push(c),
    }
}

/// Produces the canonical form of a free-form recipe name.
pub fn normalize_recipe_name(raw: &str) -> Result<String, RecipeError> {
    let name = title_case(&sanitize(raw));
    if name.is_empty() {
        return Err(RecipeError::InvalidName(raw.to_string()));
    }
    Ok(name)
}

/// Canonical form of an ingredient name, or `None` when nothing survives.
pub fn normalize_ingredient_name(raw: &str) -> Option<String> {
    let name = title_case(&sanitize(raw));
    (!name.is_empty()).then_some(name)
}
