//! Readiness endpoint; liveness comes from `axum_helpers::health_router`

use axum::{Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use database::postgres::{DatabaseConnection, check_health};

async fn ready(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "database",
        Box::pin(async { check_health(&db).await.map_err(|e| e.to_string()) }),
    )];

    match run_health_checks(checks).await {
        Ok(ok) => ok,
        Err(unavailable) => unavailable,
    }
}

/// `/ready`: 200 once Postgres answers, 503 otherwise
pub fn router(db: DatabaseConnection) -> Router {
    Router::new().route("/ready", get(ready)).with_state(db)
}
