//! Caller identity extraction
//!
//! Authentication itself is delegated to the upstream auth layer, which
//! verifies the session and forwards the caller's id in the `x-user-id`
//! header. Every route that touches creator data extracts [`AuthUser`];
//! requests without a usable identity are rejected before any query runs.

use axum::extract::FromRequestParts;
use axum::http::{request::Parts, StatusCode};
use uuid::Uuid;

use crate::domain::value_objects::OwnerId;

const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated caller, as asserted by the auth gateway
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub OwnerId);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or((StatusCode::UNAUTHORIZED, "Unauthorized".to_string()))?;

        let uuid = Uuid::parse_str(header)
            .map_err(|_| (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()))?;

        Ok(AuthUser(OwnerId::from_uuid(uuid)))
    }
}
