//! Grocery Aggregator
//!
//! Builds one grocery line per distinct ingredient name across a plan.
//! Quantities are not merged: the first occurrence supplies the quantity and
//! later occurrences only bump the count.

use super::models::{GroceryItem, MealPlan};
use std::collections::HashMap;

/// Aggregates the ingredients of every entry in `plan`.
///
/// Output order is the order in which each name was first seen (Breakfast,
/// then Lunch, then Dinner; entries and ingredients in list order).
pub fn aggregate(plan: &MealPlan) -> Vec<GroceryItem> {
    let mut items: Vec<GroceryItem> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for ingredient in plan.meals.iter().flat_map(|e| e.recipe.ingredients.iter()) {
        match positions.get(ingredient.name.as_str()) {
            Some(&pos) => items[pos].count += 1,
            None => {
                positions.insert(&ingredient.name, items.len());
                items.push(GroceryItem {
                    name: ingredient.name.clone(),
                    quantity: ingredient.quantity.clone(),
                    count: 1,
                });
            }
        }
    }

    items
}
