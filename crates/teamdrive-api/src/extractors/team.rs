//! `TeamSession` extractor: the acting team and user, from request headers.
//!
//! Authentication happens upstream; by the time a request reaches this
//! service the gateway has set `x-team-id` and `x-user-id`.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use teamdrive_core::error::AppError;
use teamdrive_core::types::{TeamId, UserId};
use teamdrive_service::RequestContext;

use crate::error::ApiError;

pub const TEAM_ID_HEADER: &str = "x-team-id";
pub const USER_ID_HEADER: &str = "x-user-id";

/// Identity of the caller available in handlers.
#[derive(Debug, Clone)]
pub struct TeamSession(pub RequestContext);

impl std::ops::Deref for TeamSession {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn header<'a>(parts: &'a Parts, name: &str) -> Result<&'a str, AppError> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::validation(format!("Missing {name} header")))
}

impl<S> FromRequestParts<S> for TeamSession
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let team_id = header(parts, TEAM_ID_HEADER)?
            .parse::<TeamId>()
            .map_err(|_| AppError::validation(format!("Invalid {TEAM_ID_HEADER} header")))?;
        let user_id = header(parts, USER_ID_HEADER)?
            .parse::<UserId>()
            .map_err(|_| AppError::validation(format!("Invalid {USER_ID_HEADER} header")))?;

        Ok(TeamSession(RequestContext::new(team_id, user_id)))
    }
}
