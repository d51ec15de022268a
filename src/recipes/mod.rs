//! Recipe Domain Module
//!
//! - Catalog models (Recipe, Ingredient, RecipeId)
//! - Catalog loading and caching
//! - Lookup and search
//! - REST API handlers

pub mod catalog;
pub mod handlers;
pub mod models;
pub mod query;

pub use catalog::RecipeCatalog;
pub use handlers::routes;
