//! API routes module

pub mod expenses;

use axum::Router;

/// Create all API routes
pub fn routes() -> Router {
    Router::new().nest("/expenses", expenses::router())
}
