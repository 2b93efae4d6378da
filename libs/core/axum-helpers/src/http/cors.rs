use axum::http::{HeaderValue, Method, header};
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Creates a CORS layer for the given origins.
///
/// Returns `Ok(None)` when no origins are configured, in which case the
/// caller should not install a CORS layer at all.
///
/// Configured layers allow:
/// - Methods: GET, POST, DELETE, OPTIONS
/// - Headers: Content-Type, Accept
/// - 1 hour max age
pub fn create_cors_layer(origins: &[String]) -> io::Result<Option<CorsLayer>> {
    if origins.is_empty() {
        return Ok(None);
    }

    let allowed_origins = origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid CORS_ALLOWED_ORIGIN value: {}", e),
            )
        })?;

    let layer = CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600));

    Ok(Some(layer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_origins_means_no_layer() {
        assert!(create_cors_layer(&[]).unwrap().is_none());
    }

    #[test]
    fn test_valid_origins_build_layer() {
        let origins = vec!["http://localhost:3000".to_string()];
        assert!(create_cors_layer(&origins).unwrap().is_some());
    }

    #[test]
    fn test_invalid_origin_is_rejected() {
        let origins = vec!["bad\norigin".to_string()];
        let err = create_cors_layer(&origins).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
