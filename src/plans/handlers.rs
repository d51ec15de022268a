//! REST API handlers for meal plan operations
//!
//! All plan operations share the `/meal-plans` path; the target plan and
//! the operation are selected by the `id` and `action` query parameters.

use super::models::{AddMealInput, CreatePlanInput, RemoveMealInput, UpdateServingsInput};
use crate::error::{AppError, Result};
use crate::helpers::{api_list, api_success, parse_body, QueryParams};
use crate::state::SharedState;
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

/// Creates routes for meal-plan operations
pub fn routes() -> Router<SharedState> {
    Router::new().route(
        "/meal-plans",
        get(get_plans)
            .post(post_plans)
            .delete(delete_plans)
            .put(put_plans)
            .fallback(crate::router::method_fallback),
    )
}

/// Query parameters selecting the plan and operation
#[derive(Debug, Default, Deserialize)]
pub struct PlanQuery {
    pub id: Option<String>,
    pub action: Option<String>,
}

impl PlanQuery {
    fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|s| !s.is_empty())
    }

    fn action(&self) -> Option<&str> {
        self.action.as_deref().filter(|s| !s.is_empty())
    }
}

type ApiResult = Result<(StatusCode, Json<Value>)>;

fn ok(status: StatusCode, body: Value) -> ApiResult {
    Ok((status, Json(body)))
}

/// Endpoint: POST /meal-plans, POST /meal-plans?id=&action=add-meal
async fn post_plans(
    State(state): State<SharedState>,
    query: QueryParams<PlanQuery>,
    body: Bytes,
) -> ApiResult {
    let Query(query) = query?;
    match (query.id(), query.action()) {
        (None, _) => {
            let input: CreatePlanInput = parse_body(&body)?;
            let plan = state.plans.create(input.name);
            ok(StatusCode::CREATED, api_success(plan))
        }
        (Some(id), Some("add-meal")) => {
            let input: AddMealInput = parse_body(&body)?;
            let recipes = state.catalog.recipes().await?;
            let entry = state.plans.add_meal(id, recipes, input)?;
            ok(StatusCode::CREATED, api_success(entry))
        }
        (Some(_), _) => Err(AppError::InvalidRequest),
    }
}

/// Endpoint: GET /meal-plans, GET /meal-plans?id=[&action=grocery-list]
async fn get_plans(
    State(state): State<SharedState>,
    query: QueryParams<PlanQuery>,
) -> ApiResult {
    let Query(query) = query?;
    match (query.id(), query.action()) {
        (None, _) => ok(StatusCode::OK, api_list(&state.plans.list())),
        (Some(id), None) => ok(StatusCode::OK, api_success(state.plans.get(id)?)),
        (Some(id), Some("grocery-list")) => {
            let items = state.plans.grocery_list(id)?;
            ok(StatusCode::OK, api_list(&items))
        }
        (Some(_), Some(_)) => Err(AppError::InvalidRequest),
    }
}

/// Endpoint: DELETE /meal-plans?id=[&action=remove-meal]
async fn delete_plans(
    State(state): State<SharedState>,
    query: QueryParams<PlanQuery>,
    body: Bytes,
) -> ApiResult {
    let Query(query) = query?;
    let id = query.id().ok_or(AppError::MissingPlanId)?;

    match query.action() {
        None => {
            state.plans.delete(id)?;
            ok(
                StatusCode::OK,
                api_success(json!({ "message": "Meal plan deleted" })),
            )
        }
        Some("remove-meal") => {
            let input: RemoveMealInput = parse_body(&body)?;
            let removed = state.plans.remove_meal(id, input)?;
            ok(
                StatusCode::OK,
                api_success(json!({ "message": "Meal removed", "removed": removed })),
            )
        }
        Some(_) => Err(AppError::InvalidRequest),
    }
}

/// Endpoint: PUT /meal-plans?id=&action=update-servings
async fn put_plans(
    State(state): State<SharedState>,
    query: QueryParams<PlanQuery>,
    body: Bytes,
) -> ApiResult {
    let Query(query) = query?;
    let id = query.id().ok_or(AppError::MissingPlanId)?;

    match query.action() {
        Some("update-servings") => {
            let input: UpdateServingsInput = parse_body(&body)?;
            let entry = state.plans.update_servings(id, input)?;
            ok(StatusCode::OK, api_success(entry))
        }
        _ => Err(AppError::InvalidRequest),
    }
}
