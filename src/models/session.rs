use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Represents a user session.
///
/// Stored server-side under `session:{id}`; the browser only holds the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// The ID of the logged-in user.
    #[serde(rename = "loggedInUserId")]
    pub user_id: String,
    /// The timestamp when the session was created.
    pub created_at: DateTime<Utc>,
    /// The timestamp when the session expires.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Starts a session for `user_id` lasting `duration_days`.
    ///
    /// Fails when the expiry falls outside the representable date range.
    pub fn start(user_id: impl Into<String>, duration_days: i64) -> Result<Self> {
        let created_at = Utc::now();
        let expires_at = chrono::Duration::try_days(duration_days)
            .and_then(|lifetime| created_at.checked_add_signed(lifetime))
            .ok_or_else(|| {
                AppError::Internal(format!("session lifetime of {duration_days} days overflows"))
            })?;

        Ok(Self {
            user_id: user_id.into(),
            created_at,
            expires_at,
        })
    }

    /// Whether the session has passed its expiry.
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}
