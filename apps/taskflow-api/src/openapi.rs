//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for TaskFlow API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "TaskFlow API",
        version = "0.1.0",
        description = "Task management API with CRUD and bulk reordering",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/tasks", api = domain_tasks::ApiDoc)
    ),
    tags(
        (name = "tasks", description = "Task management endpoints")
    )
)]
pub struct ApiDoc;
