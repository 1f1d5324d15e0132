//! Request context carrying the acting team and user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use teamdrive_core::types::{TeamId, UserId};

/// Context for the current request.
///
/// Built by the request glue from the caller's identity and passed into
/// service methods so that every operation is scoped to one team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The team whose filesystem is addressed.
    pub team_id: TeamId,
    /// The acting user.
    pub user_id: UserId,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(team_id: TeamId, user_id: UserId) -> Self {
        Self {
            team_id,
            user_id,
            request_time: Utc::now(),
        }
    }
}
