pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Error as UuidError;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Standard error response structure.
///
/// Returned for every error response:
/// - `code`: Integer error code for logging/monitoring (e.g., 1012)
/// - `error`: Machine-readable error identifier (e.g., "NOT_ACCEPTABLE")
/// - `message`: Human-readable error message
/// - `details`: Optional additional error details (e.g., field violations)
///
/// # JSON Example
///
/// ```json
/// {
///   "code": 1001,
///   "error": "VALIDATION_ERROR",
///   "message": "Request validation failed",
///   "details": [
///     {"field": "name", "constraint": "length", "value": "A"}
///   ]
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier for programmatic handling
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Optional structured error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// A single failed field constraint, flattened out of [`ValidationErrors`].
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FieldViolation {
    /// Path to the field, e.g. `projectMembers[1].email`
    pub field: String,
    /// Name of the violated constraint (`length`, `email`, ...)
    pub constraint: String,
    /// Rejected value, when the validator recorded it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Flatten nested validator output into a list of field violations.
///
/// Struct errors are joined with `.`, list errors with `[index]`. Field names
/// are reported in camelCase to match the JSON wire names, so `image_reference`
/// inside `project_members` becomes `projectMembers[0].imageReference`. The
/// result is sorted by field path so responses are deterministic.
pub fn field_violations(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut violations = Vec::new();
    collect_violations(None, errors, &mut violations);
    violations.sort_by(|a, b| (&a.field, &a.constraint).cmp(&(&b.field, &b.constraint)));
    violations
}

fn collect_violations(prefix: Option<&str>, errors: &ValidationErrors, out: &mut Vec<FieldViolation>) {
    for (field, kind) in errors.errors() {
        let field = camel_case(field);
        let path = match prefix {
            Some(prefix) => format!("{prefix}.{field}"),
            None => field,
        };

        match kind {
            ValidationErrorsKind::Field(errs) => {
                out.extend(errs.iter().map(|err| FieldViolation {
                    field: path.clone(),
                    constraint: err.code.to_string(),
                    value: err.params.get("value").cloned(),
                    message: err.message.as_ref().map(|m| m.to_string()),
                }));
            }
            ValidationErrorsKind::Struct(inner) => collect_violations(Some(&path), inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_violations(Some(&format!("{path}[{index}]")), inner, out);
                }
            }
        }
    }
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = !out.is_empty();
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Application error type that can be converted to HTTP responses.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("UUID error: {0}")]
    UuidError(#[from] UuidError),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Not Acceptable: {0}")]
    NotAcceptable(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, details, code) = match self {
            AppError::Database(e) => {
                tracing::error!(
                    error_code = ErrorCode::DatabaseError.code(),
                    "Database error: {:?}",
                    e
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DatabaseError.default_message().to_string(),
                    None,
                    ErrorCode::DatabaseError,
                )
            }
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(
                    error_code = ErrorCode::JsonExtraction.code(),
                    "JSON extraction error: {:?}",
                    e
                );
                (e.status(), e.body_text(), None, ErrorCode::JsonExtraction)
            }
            AppError::ValidationError(e) => {
                let violations = field_violations(&e);
                tracing::info!(
                    error_code = ErrorCode::ValidationError.code(),
                    violations = violations.len(),
                    "Validation error: {}",
                    e
                );
                (
                    StatusCode::BAD_REQUEST,
                    ErrorCode::ValidationError.default_message().to_string(),
                    serde_json::to_value(violations).ok(),
                    ErrorCode::ValidationError,
                )
            }
            AppError::UuidError(e) => {
                tracing::warn!(
                    error_code = ErrorCode::InvalidUuid.code(),
                    "UUID error: {:?}",
                    e
                );
                (
                    StatusCode::BAD_REQUEST,
                    ErrorCode::InvalidUuid.default_message().to_string(),
                    None,
                    ErrorCode::InvalidUuid,
                )
            }
            AppError::NotFound(msg) => {
                tracing::info!(
                    error_code = ErrorCode::NotFound.code(),
                    "Not found: {}",
                    msg
                );
                (StatusCode::NOT_FOUND, msg, None, ErrorCode::NotFound)
            }
            AppError::NotAcceptable(msg) => {
                tracing::info!(
                    error_code = ErrorCode::NotAcceptable.code(),
                    "Not acceptable: {}",
                    msg
                );
                (StatusCode::NOT_ACCEPTABLE, msg, None, ErrorCode::NotAcceptable)
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(
                    error_code = ErrorCode::InternalError.code(),
                    "Internal server error: {}",
                    msg
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::InternalError.default_message().to_string(),
                    None,
                    ErrorCode::InternalError,
                )
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!(
                    error_code = ErrorCode::ServiceUnavailable.code(),
                    "Service unavailable: {}",
                    msg
                );
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    msg,
                    None,
                    ErrorCode::ServiceUnavailable,
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code.code(),
            error: code.as_str().to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Build an error response without going through [`AppError`].
pub fn error_response(status: StatusCode, message: String, error_code: ErrorCode) -> Response {
    let body = Json(ErrorResponse {
        code: error_code.code(),
        error: error_code.as_str().to_string(),
        message,
        details: None,
    });

    (status, body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::json;
    use validator::Validate;

    #[derive(Validate)]
    struct Member {
        #[validate(email)]
        email: String,
    }

    #[derive(Validate)]
    struct Profile {
        #[validate(length(min = 1))]
        display_name: String,
        #[validate(nested)]
        linked_accounts: Vec<Member>,
    }

    #[derive(Validate)]
    struct Team {
        #[validate(length(min = 2))]
        name: String,
        #[validate(nested)]
        members: Vec<Member>,
    }

    fn team(name: &str, emails: &[&str]) -> Team {
        Team {
            name: name.to_string(),
            members: emails
                .iter()
                .map(|e| Member {
                    email: e.to_string(),
                })
                .collect(),
        }
    }

    async fn json_body(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_field_violations_flattens_nested_lists() {
        let errors = team("A", &["ok@example.com", "not-an-email"])
            .validate()
            .unwrap_err();

        let violations = field_violations(&errors);

        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].field, "members[1].email");
        assert_eq!(violations[0].constraint, "email");
        assert_eq!(violations[1].field, "name");
        assert_eq!(violations[1].constraint, "length");
        assert_eq!(violations[1].value, Some(json!("A")));
    }

    #[test]
    fn test_field_violations_use_camel_case_paths() {
        let errors = Profile {
            display_name: String::new(),
            linked_accounts: vec![Member {
                email: "nope".to_string(),
            }],
        }
        .validate()
        .unwrap_err();

        let fields: Vec<_> = field_violations(&errors)
            .into_iter()
            .map(|v| v.field)
            .collect();

        assert_eq!(fields, vec!["displayName", "linkedAccounts[0].email"]);
    }

    #[test]
    fn test_camel_case_segments() {
        assert_eq!(camel_case("image_reference"), "imageReference");
        assert_eq!(camel_case("email"), "email");
        assert_eq!(camel_case("_private_field"), "privateField");
    }

    #[test]
    fn test_field_violations_empty_for_valid_input() {
        assert!(team("Core", &["ok@example.com"]).validate().is_ok());
        assert!(field_violations(&ValidationErrors::new()).is_empty());
    }

    #[tokio::test]
    async fn test_validation_error_response() {
        let errors = team("A", &[]).validate().unwrap_err();
        let response = AppError::ValidationError(errors).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["code"], 1001);
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert_eq!(body["details"][0]["field"], "name");
        assert_eq!(body["details"][0]["constraint"], "length");
    }

    #[tokio::test]
    async fn test_not_acceptable_response_keeps_message() {
        let response = AppError::NotAcceptable("identifiers do not match".into()).into_response();

        assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);
        let body = json_body(response).await;
        assert_eq!(body["error"], "NOT_ACCEPTABLE");
        assert_eq!(body["message"], "identifiers do not match");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn test_internal_error_hides_message() {
        let response = AppError::InternalServerError("pool exhausted".into()).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["code"], 1005);
        assert_eq!(body["message"], "An internal server error occurred");
    }

    #[tokio::test]
    async fn test_database_error_maps_to_500() {
        let response = AppError::from(DbErr::Custom("boom".into())).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["error"], "DATABASE_ERROR");
    }

    #[tokio::test]
    async fn test_error_response_helper() {
        let response = error_response(
            StatusCode::NOT_FOUND,
            "missing".to_string(),
            ErrorCode::NotFound,
        );

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response).await;
        assert_eq!(body, json!({"code": 1004, "error": "NOT_FOUND", "message": "missing"}));
    }
}
