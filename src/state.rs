//! Application State Management
//!
//! Everything the handlers share lives in [`AppState`], injected through
//! axum's `State` extractor. Tests build their own isolated instances.

use crate::plans::store::MealPlanStore;
use crate::recipes::catalog::RecipeCatalog;
use crate::recipes::models::Recipe;
use std::sync::Arc;

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// Core application state: the recipe catalog and the meal plan store
pub struct AppState {
    /// Read-only recipe catalog, loaded on first use.
    pub catalog: RecipeCatalog,

    /// In-memory meal plans, keyed by plan id.
    pub plans: MealPlanStore,
}

impl AppState {
    /// Creates state around a catalog with an empty plan store
    pub fn new(catalog: RecipeCatalog) -> Self {
        Self {
            catalog,
            plans: MealPlanStore::new(),
        }
    }

    /// Creates state with an already-loaded catalog
    pub fn with_recipes(recipes: Vec<Recipe>) -> Self {
        Self::new(RecipeCatalog::from_recipes(recipes))
    }
}
