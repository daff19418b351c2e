//! Transient toast notifications.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

/// How long a toast stays visible.
pub const TOAST_TTL_MS: i64 = 3_000;

/// One user-visible notification. A newer toast replaces the current one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub id: Uuid,
    pub message: String,
    pub raised_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Toast {
    pub fn new(message: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            raised_at: now,
            expires_at: now + Duration::milliseconds(TOAST_TTL_MS),
        }
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}
