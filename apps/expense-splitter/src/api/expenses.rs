//! Expense routes
//!
//! The expense data model is not implemented yet; the list endpoint
//! returns an empty collection so clients can integrate against the
//! final URL layout.

use axum::{Json, Router, routing::get};
use serde_json::Value;
use utoipa::OpenApi;

const TAG: &str = "expenses";

#[derive(OpenApi)]
#[openapi(
    paths(list_expenses),
    tags(
        (name = TAG, description = "Expense management endpoints")
    )
)]
pub struct ApiDoc;

/// List expenses
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "List of expenses", body = Vec<Value>)
    )
)]
async fn list_expenses() -> Json<Vec<Value>> {
    Json(Vec::new())
}

pub fn router() -> Router {
    Router::new().route("/", get(list_expenses))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_expenses_is_empty() {
        let Json(expenses) = list_expenses().await;
        assert!(expenses.is_empty());
    }
}
