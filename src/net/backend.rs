//! The injected remote-collaborator surface.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::error::ApiError;
use super::types::{Profile, ProfileChanges, Session, SignUpOutcome};

/// Client surface of the hosted auth + database service.
///
/// Provided to the component tree as a context value so every screen talks
/// to the same connection and tests can substitute an in-memory fake.
/// Futures are `?Send`: all calls run on the browser's single thread.
#[async_trait(?Send)]
pub trait Backend {
    /// Point-in-time session lookup. `Ok(None)` means no usable session.
    async fn get_session(&self) -> Result<Option<Session>, ApiError>;

    /// Exchange credentials for a session.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, ApiError>;

    /// Register a new account. The outcome may carry no session when the
    /// service requires email confirmation first.
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, ApiError>;

    /// Revoke the current session remotely and forget it locally.
    async fn sign_out(&self) -> Result<(), ApiError>;

    /// Fetch one profile row by id.
    async fn fetch_profile(&self, id: Uuid) -> Result<Profile, ApiError>;

    /// Fetch every profile row, ordered by creation time ascending.
    async fn fetch_profiles(&self) -> Result<Vec<Profile>, ApiError>;

    /// Apply a partial update to one profile row.
    async fn update_profile(&self, id: Uuid, changes: &ProfileChanges) -> Result<(), ApiError>;

    /// Delete one profile row.
    async fn delete_profile(&self, id: Uuid) -> Result<(), ApiError>;
}

/// Shared handle passed through Leptos context.
pub type SharedBackend = Arc<dyn Backend + Send + Sync>;
