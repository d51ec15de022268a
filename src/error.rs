//! Error types for the meal planner service.
//!
//! Every failure a handler can produce is an [`AppError`]. Each variant maps
//! to an HTTP status code and renders as the standard
//! `{"success": false, "error": "..."}` envelope.

use crate::helpers::api_error;
use crate::recipes::catalog::CatalogError;
use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Result type alias for meal planner operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Main error type for the meal planner service
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Meal plan not found")]
    PlanNotFound,

    #[error("Recipe not found")]
    RecipeNotFound,

    #[error("Meal entry not found")]
    EntryNotFound,

    #[error("Invalid meal type")]
    InvalidMealType,

    #[error("Plan ID required")]
    MissingPlanId,

    #[error("Invalid request")]
    InvalidRequest,

    #[error("{0}")]
    InvalidArgument(String),

    /// Request body that is not valid JSON for the operation; carries the
    /// parser's message
    #[error("{0}")]
    InvalidBody(String),

    #[error(transparent)]
    InvalidQuery(#[from] QueryRejection),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Not found")]
    RouteNotFound,
}

impl AppError {
    /// Convert error to the HTTP status code it is reported with
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Catalog(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::PlanNotFound
            | AppError::RecipeNotFound
            | AppError::EntryNotFound
            | AppError::RouteNotFound => StatusCode::NOT_FOUND,
            AppError::InvalidMealType
            | AppError::MissingPlanId
            | AppError::InvalidRequest
            | AppError::InvalidArgument(_)
            | AppError::InvalidBody(_)
            | AppError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(error = %message, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %message, "request rejected");
        }

        (status, Json(api_error(message))).into_response()
    }
}
