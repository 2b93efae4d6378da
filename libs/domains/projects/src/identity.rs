//! Rules for when a project payload may carry an identifier.
//!
//! These checks are structural: they look only at the payload and the path,
//! never at the store, and run before field validation.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityViolation {
    #[error("identifier shall not be set when creating (got {0})")]
    PresentOnCreate(Uuid),

    #[error("identifiers do not match (path {path}, payload {})", payload_label(.payload))]
    Mismatch { path: Uuid, payload: Option<Uuid> },
}

fn payload_label(payload: &Option<Uuid>) -> String {
    payload.map_or_else(|| "none".to_string(), |id| id.to_string())
}

/// A new project must not bring its own identifier.
pub fn check_create(payload_id: Option<Uuid>) -> Result<(), IdentityViolation> {
    match payload_id {
        Some(id) => Err(IdentityViolation::PresentOnCreate(id)),
        None => Ok(()),
    }
}

/// An update must name the same project in the path and in the payload.
///
/// Returns the agreed identifier.
pub fn check_update(path_id: Uuid, payload_id: Option<Uuid>) -> Result<Uuid, IdentityViolation> {
    match payload_id {
        Some(id) if id == path_id => Ok(id),
        payload => Err(IdentityViolation::Mismatch {
            path: path_id,
            payload,
        }),
    }
}
