//! Wire DTOs for the hosted-service boundary.
//!
//! DESIGN
//! ======
//! These types mirror the remote service's JSON shapes so serde round-trips
//! stay lossless. Update payloads are separate types from records: what the
//! client may write is narrower than what it reads.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// The record store sends `null` for an unset display name; treat it the
/// same as a missing field.
fn deserialize_null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

/// Proof of authenticated identity issued by the remote auth service.
///
/// The client holds a transient local copy; the service owns the lifecycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token for record-store calls.
    pub access_token: String,
    /// Stable user identifier; equals the profile row's `id`.
    pub user_id: Uuid,
    /// Email the session was established with.
    pub email: String,
    /// Expiry as seconds since the Unix epoch.
    pub expires_at: i64,
}

impl Session {
    /// Whether the session has passed its expiry instant.
    #[must_use]
    pub fn is_expired(&self, now_secs: i64) -> bool {
        self.expires_at <= now_secs
    }
}

/// A user profile row from the `profiles` collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Row key; equals the owning session's `user_id`.
    pub id: Uuid,
    pub email: String,
    /// Display name; may be empty until the user sets one.
    #[serde(default, deserialize_with = "deserialize_null_as_empty")]
    pub user_name: String,
    /// Sole authorization signal for the management screen.
    pub is_admin: bool,
    /// RFC 3339 creation timestamp; list ordering follows it.
    pub created_at: String,
    pub updated_at: String,
}

/// Partial profile update. `None` fields are omitted from the request body,
/// and there is no email field at all: the client can never send one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ProfileChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
}

impl ProfileChanges {
    /// Self-service change: display name only.
    #[must_use]
    pub fn rename(user_name: impl Into<String>) -> Self {
        Self {
            user_name: Some(user_name.into()),
            is_admin: None,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.user_name.is_none() && self.is_admin.is_none()
    }

    /// Patch a local record with the confirmed changes.
    pub fn apply_to(&self, profile: &mut Profile) {
        if let Some(name) = &self.user_name {
            profile.user_name = name.clone();
        }
        if let Some(admin) = self.is_admin {
            profile.is_admin = admin;
        }
    }
}

/// Result of a sign-up call. `session` is absent when the service requires
/// an email confirmation step before granting one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignUpOutcome {
    pub session: Option<Session>,
}
