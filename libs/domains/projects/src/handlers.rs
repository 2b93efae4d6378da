use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AuditEvent, AuditOutcome, JsonBody, UuidPath,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotAcceptableResponse, NotFoundResponse,
    },
    extract_ip_from_headers, extract_user_agent,
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::entity;
use crate::error::{ProjectError, ProjectResult};
use crate::models::{Project, ProjectMember};
use crate::repository::ProjectRepository;
use crate::service::ProjectService;

/// OpenAPI documentation for Projects API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_projects,
        create_project,
        get_project,
        update_project,
        delete_project,
    ),
    components(
        schemas(Project, ProjectMember),
        responses(
            NotFoundResponse,
            NotAcceptableResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = entity::Model::TAG, description = "Project management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the project router with all HTTP endpoints
pub fn router<R: ProjectRepository + 'static>(service: ProjectService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_projects).post(create_project))
        .route(
            "/{id}",
            get(get_project).post(update_project).delete(delete_project),
        )
        .with_state(shared_service)
}

/// Record the outcome of a write; failed attempts are audited too.
fn audit(action: &str, id: Option<Uuid>, result: &ProjectResult<Project>, headers: &HeaderMap) {
    audit_event(action, id, result)
        .with_ip(extract_ip_from_headers(headers))
        .with_user_agent(extract_user_agent(headers))
        .log();
}

fn audit_event(action: &str, id: Option<Uuid>, result: &ProjectResult<Project>) -> AuditEvent {
    let resource = |id: Uuid| format!("project:{}", id);

    match result {
        Ok(project) => AuditEvent::new(
            action,
            project.id.or(id).map(resource),
            AuditOutcome::Success,
        )
        .with_details(json!({
            "project_name": project.name,
            "member_count": project.project_members.len(),
        })),
        Err(error) => AuditEvent::new(action, id.map(resource), AuditOutcome::Failure)
            .with_details(json!({
                "error": error.to_string(),
                "kind": failure_kind(error),
            })),
    }
}

fn failure_kind(error: &ProjectError) -> &'static str {
    match error {
        ProjectError::NotFound(_) => "not_found",
        ProjectError::IdentityConflict(_) => "identity_conflict",
        ProjectError::Validation(_) => "validation",
        ProjectError::Store(_) | ProjectError::InvalidArgument(_) => "internal",
    }
}

/// List all projects
#[utoipa::path(
    get,
    path = "",
    tag = entity::Model::TAG,
    responses(
        (status = 200, description = "List of projects", body = Vec<Project>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_projects<R: ProjectRepository>(
    State(service): State<Arc<ProjectService<R>>>,
) -> ProjectResult<Json<Vec<Project>>> {
    let projects = service.list_projects().await?;
    Ok(Json(projects))
}

/// Create a new project
#[utoipa::path(
    post,
    path = "",
    tag = entity::Model::TAG,
    request_body = Project,
    responses(
        (status = 201, description = "Project created successfully", body = Project),
        (status = 400, response = BadRequestValidationResponse),
        (status = 406, response = NotAcceptableResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_project<R: ProjectRepository>(
    State(service): State<Arc<ProjectService<R>>>,
    headers: HeaderMap,
    JsonBody(input): JsonBody<Project>,
) -> ProjectResult<impl IntoResponse> {
    let result = service.create_project(input).await;
    audit("project.create", None, &result, &headers);

    Ok((StatusCode::CREATED, Json(result?)))
}

/// Get a project by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = entity::Model::TAG,
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project found", body = Project),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_project<R: ProjectRepository>(
    State(service): State<Arc<ProjectService<R>>>,
    UuidPath(id): UuidPath,
) -> ProjectResult<Json<Project>> {
    let project = service.get_project(id).await?;
    Ok(Json(project))
}

/// Replace a project
///
/// The payload's `projectId` must equal the path id.
#[utoipa::path(
    post,
    path = "/{id}",
    tag = entity::Model::TAG,
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    request_body = Project,
    responses(
        (status = 200, description = "Project updated successfully", body = Project),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 406, response = NotAcceptableResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_project<R: ProjectRepository>(
    State(service): State<Arc<ProjectService<R>>>,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
    JsonBody(input): JsonBody<Project>,
) -> ProjectResult<Json<Project>> {
    let result = service.update_project(id, input).await;
    audit("project.update", Some(id), &result, &headers);

    Ok(Json(result?))
}

/// Delete a project
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = entity::Model::TAG,
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project deleted; body is its last state", body = Project),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_project<R: ProjectRepository>(
    State(service): State<Arc<ProjectService<R>>>,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
) -> ProjectResult<Json<Project>> {
    let result = service.delete_project(id).await;
    audit("project.delete", Some(id), &result, &headers);

    Ok(Json(result?))
}
