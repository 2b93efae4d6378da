//! API routes module

pub mod health;
pub mod projects;

use axum::Router;

use crate::state::AppState;

/// Create all routes nested under `/api`
pub fn routes(state: &AppState) -> Router {
    Router::new().nest("/project", projects::router(state))
}
