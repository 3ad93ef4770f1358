//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// OpenAPI documentation for Expense Splitter API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Expense Splitter API",
        version = "0.1.0",
        description = "Expense splitting API (service skeleton)",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/expenses", api = crate::api::expenses::ApiDoc)
    ),
    tags(
        (name = "expenses", description = "Expense management endpoints")
    )
)]
pub struct ApiDoc;
