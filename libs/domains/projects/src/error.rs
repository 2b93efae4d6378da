use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

use crate::identity::IdentityViolation;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Project not found: {0}")]
    NotFound(Uuid),

    #[error(transparent)]
    IdentityConflict(#[from] IdentityViolation),

    #[error("Invalid project: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type ProjectResult<T> = Result<T, ProjectError>;

impl From<DbErr> for ProjectError {
    fn from(err: DbErr) -> Self {
        ProjectError::Store(err.to_string())
    }
}

/// Convert ProjectError to AppError for standardized error responses
impl From<ProjectError> for AppError {
    fn from(err: ProjectError) -> Self {
        match err {
            ProjectError::NotFound(id) => AppError::NotFound(format!("Project {} not found", id)),
            ProjectError::IdentityConflict(violation) => {
                AppError::NotAcceptable(violation.to_string())
            }
            ProjectError::Validation(errors) => AppError::ValidationError(errors),
            ProjectError::Store(msg) => AppError::InternalServerError(msg),
            ProjectError::InvalidArgument(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProjectError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
