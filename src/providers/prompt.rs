/// The prompt template used for generating a recipe's ingredient list.
///
/// The template is loaded from `prompt.txt` at compile time using the
/// `include_str!` macro, making it easy to edit without dealing with
/// Rust string syntax.
///
/// Contains `{{NAME}}` and `{{SERVINGS}}` placeholders that are replaced
/// by [`build_prompt`].
pub const INGREDIENT_PROMPT_TEMPLATE: &str = include_str!("prompt.txt");

/// Build the generation prompt for a canonical recipe name.
pub fn build_prompt(canonical_name: &str, servings: u32) -> String {
    INGREDIENT_PROMPT_TEMPLATE
        .replace("{{NAME}}", canonical_name)
        .replace("{{SERVINGS}}", &servings.to_string())
}
