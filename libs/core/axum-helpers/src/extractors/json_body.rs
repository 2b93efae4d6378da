//! JSON body extractor that rejects through [`AppError`].

use crate::errors::AppError;
use axum::{
    extract::{FromRequest, Json, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

/// Deserializes the request body without validating it.
///
/// Use it when the handler has checks that must run before field
/// validation; call `Validate::validate` (or a domain service) afterwards.
///
/// # Example
/// ```ignore
/// async fn create(JsonBody(payload): JsonBody<CreateProject>) -> impl IntoResponse {
///     service.create(payload).await
/// }
/// ```
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::from(rejection).into_response())?;

        Ok(JsonBody(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode, header},
        routing::post,
    };
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Payload {
        name: String,
    }

    fn app() -> Router {
        Router::new().route("/", post(|JsonBody(p): JsonBody<Payload>| async move { p.name }))
    }

    fn request(content_type: &str, body: &'static str) -> Request<Body> {
        Request::post("/")
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_body_is_extracted() {
        let response = app()
            .oneshot(request("application/json", r#"{"name":"core"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"core");
    }

    #[tokio::test]
    async fn test_malformed_body_uses_error_envelope() {
        let response = app()
            .oneshot(request("application/json", "{not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "JSON_EXTRACTION");
        assert_eq!(body["code"], 1003);
    }

    #[tokio::test]
    async fn test_missing_content_type_is_unsupported_media_type() {
        let response = app()
            .oneshot(request("text/plain", r#"{"name":"core"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }
}
