//! Integration tests for the meal planner HTTP API
//!
//! These tests drive the complete router, including:
//! - Recipe listing, lookup and search
//! - Meal plan lifecycle (create, list, get, delete)
//! - Meal entry mutation and grocery lists
//! - CORS and OPTIONS handling
//! - Error envelopes

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt; // for `oneshot`

use meal_planner_rust::recipes::RecipeCatalog;
use meal_planner_rust::router::create_app_router;
use meal_planner_rust::state::AppState;

fn test_recipes() -> Value {
    json!([
        { "id": 1, "title": "Omelette", "dietary_restrictions": "Vegetarian",
          "section": "Breakfast",
          "ingredients": [{ "name": "egg", "quantity": "2" }] },
        { "id": 2, "title": "Tomato Soup", "dietary_restrictions": "Vegan",
          "section": "Lunch, Dinner",
          "ingredients": [
            { "name": "tomato", "quantity": "4" },
            { "name": "onion", "quantity": "1" }
          ] },
        { "id": 3, "title": "Shakshuka", "dietary_restrictions": "Vegetarian",
          "section": "Breakfast, Dinner",
          "ingredients": [
            { "name": "egg", "quantity": "4" },
            { "name": "tomato", "quantity": "6" }
          ] }
    ])
}

/// Helper function to create a test app instance
fn create_test_app() -> axum::Router {
    let recipes = serde_json::from_value(test_recipes()).unwrap();
    create_app_router(Arc::new(AppState::with_recipes(recipes)))
}

/// Helper function to send a request and get the JSON response
async fn send_request(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let body = match body {
        Some(v) => Body::from(serde_json::to_string(&v).unwrap()),
        None => Body::empty(),
    };
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(json!({}));

    (status, body)
}

async fn create_plan(app: &axum::Router, name: Option<&str>) -> String {
    let body = name.map(|n| json!({ "name": n }));
    let (status, body) = send_request(app, "POST", "/meal-plans", body).await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["id"].as_str().unwrap().to_string()
}

async fn add_meal(app: &axum::Router, plan_id: &str, body: Value) -> (StatusCode, Value) {
    let uri = format!("/meal-plans?id={plan_id}&action=add-meal");
    send_request(app, "POST", &uri, Some(body)).await
}

// =============================================================================
// Recipes
// =============================================================================

#[tokio::test]
async fn test_list_recipes() {
    let app = create_test_app();

    let (status, body) = send_request(&app, "GET", "/recipes", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 3);
    assert_eq!(body["data"][0]["title"], "Omelette");
}

#[tokio::test]
async fn test_get_recipe_by_id() {
    let app = create_test_app();

    let (status, body) = send_request(&app, "GET", "/recipes?id=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Tomato Soup");
    assert!(body.get("count").is_none());

    let (status, body) = send_request(&app, "GET", "/recipes?id=42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Recipe not found");
}

#[tokio::test]
async fn test_api_prefix() {
    let app = create_test_app();

    let (status, body) = send_request(&app, "GET", "/api/recipes?id=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Omelette");
}

#[tokio::test]
async fn test_search() {
    let app = create_test_app();

    let (status, body) = send_request(&app, "GET", "/search?q=EGG", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["data"][0]["title"], "Omelette");
    assert_eq!(body["data"][1]["title"], "Shakshuka");

    let (_, body) = send_request(&app, "GET", "/search?q=tomato&meal_type=Breakfast", None).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["title"], "Shakshuka");

    let (_, body) = send_request(&app, "GET", "/search", None).await;
    assert_eq!(body["count"], 3);
}

#[tokio::test]
async fn test_catalog_load_failure_is_server_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recipes.json");
    let state = AppState::new(RecipeCatalog::open(&path));
    let app = create_app_router(Arc::new(state));

    let (status, body) = send_request(&app, "GET", "/recipes", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("recipes.json"));

    // The next request retries the load.
    std::fs::write(&path, test_recipes().to_string()).unwrap();
    let (status, body) = send_request(&app, "GET", "/recipes", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);
}

// =============================================================================
// Meal plans
// =============================================================================

#[tokio::test]
async fn test_create_and_get_plan() {
    let app = create_test_app();

    let (status, body) =
        send_request(&app, "POST", "/meal-plans", Some(json!({ "name": "Week 1" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["id"], "plan-1");
    assert_eq!(body["data"]["name"], "Week 1");

    let (status, body) = send_request(&app, "GET", "/meal-plans?id=plan-1", None).await;
    assert_eq!(status, StatusCode::OK);
    let plan = &body["data"];
    assert_eq!(plan["name"], "Week 1");
    for meal_type in ["Breakfast", "Lunch", "Dinner"] {
        assert_eq!(plan["meals"][meal_type], json!([]));
    }
}

#[tokio::test]
async fn test_create_plan_without_body_uses_default_name() {
    let app = create_test_app();

    let plan_id = create_plan(&app, None).await;
    let (_, body) = send_request(&app, "GET", &format!("/meal-plans?id={plan_id}"), None).await;
    assert_eq!(body["data"]["name"], format!("Meal Plan {plan_id}"));
}

#[tokio::test]
async fn test_list_plans_in_creation_order() {
    let app = create_test_app();

    for name in ["a", "b", "c"] {
        create_plan(&app, Some(name)).await;
    }

    let (status, body) = send_request(&app, "GET", "/meal-plans", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn test_delete_plan() {
    let app = create_test_app();
    let plan_id = create_plan(&app, None).await;
    let uri = format!("/meal-plans?id={plan_id}");

    let (status, body) = send_request(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["message"], "Meal plan deleted");

    let (status, body) = send_request(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Meal plan not found");

    let (status, _) = send_request(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_plan_id() {
    let app = create_test_app();

    let (status, body) = send_request(&app, "DELETE", "/meal-plans", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Plan ID required");

    let (status, _) = send_request(&app, "PUT", "/meal-plans?action=update-servings", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_add_meal_and_grocery_list() {
    let app = create_test_app();
    let plan_id = create_plan(&app, None).await;

    let (status, body) =
        add_meal(&app, &plan_id, json!({ "recipeId": 1, "mealType": "Breakfast" })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["recipeId"], "1");
    assert_eq!(body["data"]["servingMultiplier"], 1.0);
    assert_eq!(body["data"]["recipe"]["title"], "Omelette");
    assert!(body["data"]["addedAt"].is_string());
    assert!(body["data"].get("updatedAt").is_none());

    let uri = format!("/meal-plans?id={plan_id}&action=grocery-list");
    let (status, body) = send_request(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(
        body["data"],
        json!([{ "name": "egg", "quantity": "2", "count": 1 }])
    );
}

#[tokio::test]
async fn test_grocery_list_counts_repeated_ingredients() {
    let app = create_test_app();
    let plan_id = create_plan(&app, None).await;

    add_meal(&app, &plan_id, json!({ "recipeId": "2", "mealType": "Lunch" })).await;
    add_meal(&app, &plan_id, json!({ "recipeId": 3, "mealType": "Dinner" })).await;
    add_meal(&app, &plan_id, json!({ "recipeId": 1, "mealType": "Breakfast" })).await;

    let uri = format!("/meal-plans?id={plan_id}&action=grocery-list");
    let (_, body) = send_request(&app, "GET", &uri, None).await;

    assert_eq!(body["count"], 3);
    assert_eq!(
        body["data"],
        json!([
            { "name": "egg", "quantity": "2", "count": 2 },
            { "name": "tomato", "quantity": "4", "count": 2 },
            { "name": "onion", "quantity": "1", "count": 1 }
        ])
    );
}

#[tokio::test]
async fn test_grocery_list_missing_plan() {
    let app = create_test_app();

    let (status, body) =
        send_request(&app, "GET", "/meal-plans?id=plan-7&action=grocery-list", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Meal plan not found");
}

#[tokio::test]
async fn test_add_meal_errors() {
    let app = create_test_app();

    let (status, body) =
        add_meal(&app, "plan-99", json!({ "recipeId": 1, "mealType": "Lunch" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Meal plan not found");

    let plan_id = create_plan(&app, None).await;

    let (status, body) =
        add_meal(&app, &plan_id, json!({ "recipeId": 99, "mealType": "Lunch" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Recipe not found");

    let (status, body) =
        add_meal(&app, &plan_id, json!({ "recipeId": 1, "mealType": "Snack" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid meal type");

    // Nothing was added by the failed calls.
    let (_, body) = send_request(&app, "GET", &format!("/meal-plans?id={plan_id}"), None).await;
    for meal_type in ["Breakfast", "Lunch", "Dinner"] {
        assert_eq!(body["data"]["meals"][meal_type], json!([]));
    }
}

#[tokio::test]
async fn test_remove_meal() {
    let app = create_test_app();
    let plan_id = create_plan(&app, None).await;
    add_meal(&app, &plan_id, json!({ "recipeId": 1, "mealType": "Dinner" })).await;
    add_meal(&app, &plan_id, json!({ "recipeId": 2, "mealType": "Dinner" })).await;

    let uri = format!("/meal-plans?id={plan_id}&action=remove-meal");

    let (status, body) = send_request(
        &app,
        "DELETE",
        &uri,
        Some(json!({ "mealType": "Dinner", "index": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Meal entry not found");

    let (status, body) = send_request(
        &app,
        "DELETE",
        &uri,
        Some(json!({ "mealType": "Dinner", "index": "0" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["message"], "Meal removed");
    assert_eq!(body["data"]["removed"]["recipeId"], "1");

    let (_, body) = send_request(&app, "GET", &format!("/meal-plans?id={plan_id}"), None).await;
    let dinner = body["data"]["meals"]["Dinner"].as_array().unwrap();
    assert_eq!(dinner.len(), 1);
    assert_eq!(dinner[0]["recipeId"], "2");
}

#[tokio::test]
async fn test_remove_meal_invalid_meal_type() {
    let app = create_test_app();
    let plan_id = create_plan(&app, None).await;

    let uri = format!("/meal-plans?id={plan_id}&action=remove-meal");
    let (status, body) = send_request(
        &app,
        "DELETE",
        &uri,
        Some(json!({ "mealType": "Brunch", "index": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid meal type");
}

#[tokio::test]
async fn test_update_servings() {
    let app = create_test_app();
    let plan_id = create_plan(&app, None).await;
    add_meal(
        &app,
        &plan_id,
        json!({ "recipeId": 2, "mealType": "Lunch", "servingMultiplier": 2 }),
    )
    .await;

    let uri = format!("/meal-plans?id={plan_id}&action=update-servings");
    let (status, body) = send_request(
        &app,
        "PUT",
        &uri,
        Some(json!({ "mealType": "Lunch", "index": 0, "servingMultiplier": 3.5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["servingMultiplier"], 3.5);
    assert!(body["data"]["updatedAt"].is_string());

    let (status, _) = send_request(
        &app,
        "PUT",
        &uri,
        Some(json!({ "mealType": "Lunch", "index": 1, "servingMultiplier": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send_request(
        &app,
        "PUT",
        &uri,
        Some(json!({ "mealType": "Lunch", "index": 0, "servingMultiplier": -2 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Serving multiplier must be positive");
}

#[tokio::test]
async fn test_unknown_action() {
    let app = create_test_app();
    let plan_id = create_plan(&app, None).await;

    let uri = format!("/meal-plans?id={plan_id}&action=explode");
    let (status, body) = send_request(&app, "POST", &uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request");
}

#[tokio::test]
async fn test_invalid_json_body() {
    let app = create_test_app();
    let plan_id = create_plan(&app, None).await;

    let request = Request::builder()
        .method("POST")
        .uri(format!("/meal-plans?id={plan_id}&action=add-meal"))
        .header("content-type", "application/json")
        .body(Body::from("invalid json {{{"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(body["success"], false);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("expected value"));
}

#[tokio::test]
async fn test_falsy_serving_multiplier_defaults_to_one() {
    let app = create_test_app();

    let (status, body) = add_meal(
        &app,
        "plan-404",
        json!({ "recipeId": 1, "mealType": "Breakfast", "servingMultiplier": false }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Meal plan not found");

    let plan_id = create_plan(&app, None).await;
    for falsy in [json!(false), json!("")] {
        let (status, body) = add_meal(
            &app,
            &plan_id,
            json!({ "recipeId": 1, "mealType": "Breakfast", "servingMultiplier": falsy }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["servingMultiplier"], 1.0);
    }

    let uri = format!("/meal-plans?id={plan_id}&action=update-servings");
    let (status, body) = send_request(
        &app,
        "PUT",
        &uri,
        Some(json!({ "mealType": "Breakfast", "index": 1, "servingMultiplier": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["servingMultiplier"], 1.0);
}

#[tokio::test]
async fn test_malformed_query_string_uses_json_envelope() {
    let app = create_test_app();

    for uri in ["/meal-plans?id=a&id=b", "/recipes?id=1&id=2", "/api/search?q=a&q=b"] {
        let (status, body) = send_request(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["success"], false, "{uri}");
        assert!(body["error"].as_str().unwrap().contains("duplicate field"), "{uri}");
    }
}

#[tokio::test]
async fn test_multiple_plans_isolation() {
    let app = create_test_app();
    let first = create_plan(&app, Some("first")).await;
    let second = create_plan(&app, Some("second")).await;

    add_meal(&app, &first, json!({ "recipeId": 1, "mealType": "Breakfast" })).await;

    let (_, body) = send_request(&app, "GET", &format!("/meal-plans?id={second}"), None).await;
    assert_eq!(body["data"]["meals"]["Breakfast"], json!([]));
}

// =============================================================================
// HTTP plumbing
// =============================================================================

#[tokio::test]
async fn test_method_not_allowed() {
    let app = create_test_app();

    let (status, body) = send_request(&app, "PATCH", "/meal-plans?id=plan-1", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["error"], "Method not allowed");

    let (status, _) = send_request(&app, "POST", "/recipes", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_unknown_route() {
    let app = create_test_app();

    let (status, body) = send_request(&app, "GET", "/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_bare_options_is_empty_ok() {
    let app = create_test_app();

    for uri in ["/meal-plans", "/recipes", "/anything"] {
        let request = Request::builder()
            .method("OPTIONS")
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(body_bytes.is_empty());
    }
}

#[tokio::test]
async fn test_cors_preflight() {
    let app = create_test_app();

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/meal-plans")
        .header("origin", "https://example.com")
        .header("access-control-request-method", "PUT")
        .header("access-control-request-headers", "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    assert_eq!(
        headers["access-control-allow-origin"],
        "https://example.com"
    );
    assert_eq!(headers["access-control-allow-credentials"], "true");
    assert!(headers["access-control-allow-methods"]
        .to_str()
        .unwrap()
        .contains("PUT"));
}

#[tokio::test]
async fn test_cors_headers_on_simple_request() {
    let app = create_test_app();

    let request = Request::builder()
        .method("GET")
        .uri("/recipes")
        .header("origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "http://localhost:3000"
    );
}
