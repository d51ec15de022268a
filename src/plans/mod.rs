//! Meal Plan Domain Module
//!
//! - Domain models (MealPlan, MealEntry, MealType, inputs)
//! - Business logic helpers (ids, multipliers, index parsing)
//! - The in-memory plan store
//! - Grocery list aggregation
//! - REST API handlers

pub mod grocery;
pub mod handlers;
pub mod helpers;
pub mod models;
pub mod store;

pub use handlers::routes;
pub use store::MealPlanStore;
