//! Meal Plan Domain Models
//!
//! Plans, entries, request inputs and the grocery list item.

use crate::error::AppError;
use crate::recipes::models::{Recipe, RecipeId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Meal Types
// =============================================================================

/// The fixed set of meal slots in a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealType {
    /// All meal types, in plan order
    pub const ALL: [MealType; 3] = [MealType::Breakfast, MealType::Lunch, MealType::Dinner];

    pub fn as_str(self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
        }
    }
}

impl FromStr for MealType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Breakfast" => Ok(MealType::Breakfast),
            "Lunch" => Ok(MealType::Lunch),
            "Dinner" => Ok(MealType::Dinner),
            _ => Err(AppError::InvalidMealType),
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Plans and Entries
// =============================================================================

/// One recipe attached to a plan
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MealEntry {
    pub recipe_id: RecipeId,

    /// Snapshot of the recipe at the time it was added
    pub recipe: Recipe,

    pub serving_multiplier: f64,

    pub added_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Per-meal-type entry lists. Always carries all three slots.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Meals {
    pub breakfast: Vec<MealEntry>,
    pub lunch: Vec<MealEntry>,
    pub dinner: Vec<MealEntry>,
}

impl Meals {
    pub fn entries(&self, meal_type: MealType) -> &Vec<MealEntry> {
        match meal_type {
            MealType::Breakfast => &self.breakfast,
            MealType::Lunch => &self.lunch,
            MealType::Dinner => &self.dinner,
        }
    }

    pub fn entries_mut(&mut self, meal_type: MealType) -> &mut Vec<MealEntry> {
        match meal_type {
            MealType::Breakfast => &mut self.breakfast,
            MealType::Lunch => &mut self.lunch,
            MealType::Dinner => &mut self.dinner,
        }
    }

    /// Iterates every entry, meal types in plan order
    pub fn iter(&self) -> impl Iterator<Item = &MealEntry> {
        MealType::ALL
            .into_iter()
            .flat_map(move |meal_type| self.entries(meal_type).iter())
    }
}

/// A named collection of recipe entries grouped by meal type
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MealPlan {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub meals: Meals,
}

/// One line of a grocery list
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GroceryItem {
    pub name: String,

    /// Quantity from the first recipe that needed this ingredient
    pub quantity: String,

    /// Number of ingredient lines across the plan with this name
    pub count: u32,
}

// =============================================================================
// Request Inputs
// =============================================================================

/// Body of POST /meal-plans
#[derive(Debug, Default, Deserialize)]
pub struct CreatePlanInput {
    pub name: Option<String>,
}

/// Body of POST /meal-plans?action=add-meal
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMealInput {
    pub recipe_id: Option<RecipeId>,
    pub meal_type: Option<String>,

    /// Number, numeric string, or a falsy value meaning one serving
    pub serving_multiplier: Option<Value>,
}

/// Body of DELETE /meal-plans?action=remove-meal
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveMealInput {
    pub meal_type: Option<String>,

    /// Integer, numeric string, or anything else (treated as out of bounds)
    pub index: Option<Value>,
}

/// Body of PUT /meal-plans?action=update-servings
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServingsInput {
    pub meal_type: Option<String>,
    pub index: Option<Value>,
    pub serving_multiplier: Option<Value>,
}
