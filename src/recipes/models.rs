//! Recipe Catalog Models
//!
//! Data structures for catalog entries. Recipes are immutable once loaded;
//! meal entries embed a clone of the recipe they were created from.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

// =============================================================================
// Identifiers
// =============================================================================

/// Canonical recipe identifier.
///
/// The catalog and clients may spell an id as a JSON number or a string.
/// Both are normalized here so that `1`, `"1"`, `"01"` and `1.0` compare
/// equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecipeId(String);

impl RecipeId {
    /// Normalizes a textual identifier.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Ok(n) = trimmed.parse::<i64>() {
            return Self(n.to_string());
        }
        if let Ok(f) = trimmed.parse::<f64>() {
            if let Some(n) = integral(f) {
                return Self(n.to_string());
            }
        }
        Self(trimmed.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_number(n: &serde_json::Number) -> Self {
        if let Some(i) = n.as_i64() {
            return Self(i.to_string());
        }
        if let Some(u) = n.as_u64() {
            return Self(u.to_string());
        }
        match n.as_f64().and_then(integral) {
            Some(i) => Self(i.to_string()),
            None => Self(n.to_string()),
        }
    }
}

fn integral(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64).then_some(f as i64)
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for RecipeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecipeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(RecipeId::parse(&s)),
            Value::Number(n) => Ok(RecipeId::from_number(&n)),
            other => Err(de::Error::custom(format!(
                "recipe id must be a string or number, got {other}"
            ))),
        }
    }
}

// =============================================================================
// Catalog Entries
// =============================================================================

/// A single ingredient line of a recipe
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ingredient {
    pub name: String,

    /// Free-text amount ("2", "1 cup"). Numeric amounts are stored as text.
    #[serde(default, deserialize_with = "text_or_number")]
    pub quantity: String,
}

/// An immutable catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    pub id: RecipeId,

    pub title: String,

    #[serde(default)]
    pub dietary_restrictions: String,

    /// Meal-type tag, e.g. "Breakfast" or "Lunch, Dinner"
    #[serde(default)]
    pub section: String,

    #[serde(default)]
    pub ingredients: Vec<Ingredient>,

    /// Any other catalog fields (instructions, images, ...) passed through untouched
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

fn text_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "quantity must be a string or number, got {other}"
        ))),
    }
}
