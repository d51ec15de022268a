//! REST API handlers for recipe browsing and search

use super::{
    models::RecipeId,
    query::{find_by_id, search, SearchParams},
};
use crate::error::{AppError, Result};
use crate::helpers::{api_list, api_success, QueryParams};
use crate::state::SharedState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;

/// Creates routes for recipe-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/recipes", get(get_recipes).fallback(crate::router::method_fallback))
        .route("/search", get(search_recipes).fallback(crate::router::method_fallback))
}

#[derive(Debug, Deserialize)]
struct RecipeQuery {
    id: Option<String>,
}

/// Endpoint: GET /recipes[?id=]
/// Lists the whole catalog, or returns a single recipe when `id` is given.
async fn get_recipes(
    State(state): State<SharedState>,
    query: QueryParams<RecipeQuery>,
) -> Result<Json<Value>> {
    let Query(query) = query?;
    let recipes = state.catalog.recipes().await?;

    match query.id {
        Some(raw) => {
            let id = RecipeId::parse(&raw);
            let recipe = find_by_id(recipes, &id).ok_or(AppError::RecipeNotFound)?;
            Ok(Json(api_success(recipe)))
        }
        None => Ok(Json(api_list(recipes))),
    }
}

/// Endpoint: GET /search?q=&meal_type=
async fn search_recipes(
    State(state): State<SharedState>,
    params: QueryParams<SearchParams>,
) -> Result<Json<Value>> {
    let Query(params) = params?;
    let recipes = state.catalog.recipes().await?;
    let found = search(recipes, &params);
    tracing::debug!(q = ?params.q, meal_type = ?params.meal_type, hits = found.len(), "recipe search");
    Ok(Json(api_list(&found)))
}
