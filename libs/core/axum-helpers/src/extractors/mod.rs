//! Custom extractors for Axum handlers.
//!
//! Both extractors reject with [`AppError`](crate::errors::AppError) so every
//! failure reaches the client in the standard error envelope.

pub mod json_body;
pub mod uuid_path;

pub use json_body::JsonBody;
pub use uuid_path::UuidPath;
