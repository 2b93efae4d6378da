//! Projects API routes

use axum::Router;
use domain_projects::{PgProjectRepository, ProjectService, handlers};

use crate::state::AppState;

/// Create projects router
pub fn router(state: &AppState) -> Router {
    let repository = PgProjectRepository::new(state.db.clone());
    let service = ProjectService::new(repository);
    handlers::router(service)
}
