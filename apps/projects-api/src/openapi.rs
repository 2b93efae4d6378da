//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for Projects API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Projects API",
        version = "0.1.0",
        description = "Projects and their members: create, read, replace and delete",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/project", api = domain_projects::ApiDoc)
    ),
    tags(
        (name = "project", description = "Project management endpoints")
    )
)]
pub struct ApiDoc;
