//! Meal Planner Library
//!
//! Recipe browsing and search over a static JSON catalog, plus in-memory
//! meal plans with grocery list aggregation, served over HTTP.

// Domain modules
pub mod plans;
pub mod recipes;

// Infrastructure
pub mod config;
pub mod error;
pub mod helpers;
pub mod observability;
pub mod router;
pub mod state;
