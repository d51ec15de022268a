//! Recipe Query Service
//!
//! Lookup and filtering over the loaded catalog. All functions preserve
//! catalog order.

use super::models::{Recipe, RecipeId};
use serde::Deserialize;

/// Query-string parameters accepted by the search endpoint
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// Free-text term matched against title, dietary restrictions and ingredients
    pub q: Option<String>,

    /// Substring of the recipe's section tag
    pub meal_type: Option<String>,
}

/// Returns the first recipe whose id matches.
pub fn find_by_id<'a>(recipes: &'a [Recipe], id: &RecipeId) -> Option<&'a Recipe> {
    recipes.iter().find(|r| &r.id == id)
}

/// Applies the search filters in sequence. Empty parameters are ignored.
pub fn search<'a>(recipes: &'a [Recipe], params: &SearchParams) -> Vec<&'a Recipe> {
    let term = params
        .q
        .as_deref()
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase);
    let meal_type = params.meal_type.as_deref().filter(|m| !m.is_empty());

    recipes
        .iter()
        .filter(|r| term.as_deref().map_or(true, |t| matches_term(r, t)))
        .filter(|r| meal_type.map_or(true, |m| r.section.contains(m)))
        .collect()
}

/// Case-insensitive match; `term` must already be lowercase.
fn matches_term(recipe: &Recipe, term: &str) -> bool {
    recipe.title.to_lowercase().contains(term)
        || recipe.dietary_restrictions.to_lowercase().contains(term)
        || recipe
            .ingredients
            .iter()
            .any(|i| i.name.to_lowercase().contains(term))
}
