//! In-memory backend for unit tests.
//!
//! Records every call by method name so tests can assert that a guarded
//! screen issued no remote calls, and lets individual operations be forced
//! to fail to exercise rollback paths.

use std::cell::{Cell, RefCell};

use async_trait::async_trait;
use uuid::Uuid;

use super::backend::Backend;
use super::error::ApiError;
use super::types::{Profile, ProfileChanges, Session, SignUpOutcome};

/// Deterministic profile fixture. `n` drives id, email, and creation order.
pub fn profile(n: u8, admin: bool) -> Profile {
    Profile {
        id: Uuid::from_u128(u128::from(n)),
        email: format!("user{n}@example.com"),
        user_name: format!("User {n}"),
        is_admin: admin,
        created_at: format!("2026-01-0{n}T00:00:00Z"),
        updated_at: format!("2026-01-0{n}T00:00:00Z"),
    }
}

/// Session fixture matching `profile(n, _)` identity.
pub fn session(n: u8) -> Session {
    Session {
        access_token: format!("token-{n}"),
        user_id: Uuid::from_u128(u128::from(n)),
        email: format!("user{n}@example.com"),
        expires_at: i64::MAX,
    }
}

#[derive(Default)]
pub struct FakeBackend {
    pub profiles: RefCell<Vec<Profile>>,
    pub session: RefCell<Option<Session>>,
    pub calls: RefCell<Vec<String>>,
    pub fail_session: Cell<bool>,
    pub fail_fetch: Cell<bool>,
    pub fail_list: Cell<bool>,
    pub fail_update: Cell<bool>,
    pub fail_delete: Cell<bool>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profiles(profiles: Vec<Profile>) -> Self {
        let backend = Self::default();
        *backend.profiles.borrow_mut() = profiles;
        backend
    }

    pub fn call_names(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.borrow_mut().push(call.into());
    }

    fn offline() -> ApiError {
        ApiError::Network("connection refused".to_owned())
    }
}

#[async_trait(?Send)]
impl Backend for FakeBackend {
    async fn get_session(&self) -> Result<Option<Session>, ApiError> {
        self.record("get_session");
        if self.fail_session.get() {
            return Err(Self::offline());
        }
        Ok(self.session.borrow().clone())
    }

    async fn sign_in(&self, email: &str, _password: &str) -> Result<Session, ApiError> {
        self.record(format!("sign_in:{email}"));
        self.session.borrow().clone().ok_or(ApiError::Rejected {
            status: 400,
            message: "invalid login credentials".to_owned(),
        })
    }

    async fn sign_up(&self, email: &str, _password: &str) -> Result<SignUpOutcome, ApiError> {
        self.record(format!("sign_up:{email}"));
        Ok(SignUpOutcome {
            session: self.session.borrow().clone(),
        })
    }

    async fn sign_out(&self) -> Result<(), ApiError> {
        self.record("sign_out");
        *self.session.borrow_mut() = None;
        Ok(())
    }

    async fn fetch_profile(&self, id: Uuid) -> Result<Profile, ApiError> {
        self.record(format!("fetch_profile:{id}"));
        if self.fail_fetch.get() {
            return Err(Self::offline());
        }
        self.profiles
            .borrow()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(ApiError::Rejected {
                status: 406,
                message: "no rows returned".to_owned(),
            })
    }

    async fn fetch_profiles(&self) -> Result<Vec<Profile>, ApiError> {
        self.record("fetch_profiles");
        if self.fail_list.get() {
            return Err(Self::offline());
        }
        Ok(self.profiles.borrow().clone())
    }

    async fn update_profile(&self, id: Uuid, changes: &ProfileChanges) -> Result<(), ApiError> {
        self.record(format!("update_profile:{id}"));
        if self.fail_update.get() {
            return Err(ApiError::Rejected {
                status: 403,
                message: "row-level security violation".to_owned(),
            });
        }
        let mut profiles = self.profiles.borrow_mut();
        let profile = profiles.iter_mut().find(|p| p.id == id).ok_or(
            ApiError::Rejected {
                status: 404,
                message: "row not found".to_owned(),
            },
        )?;
        changes.apply_to(profile);
        Ok(())
    }

    async fn delete_profile(&self, id: Uuid) -> Result<(), ApiError> {
        self.record(format!("delete_profile:{id}"));
        if self.fail_delete.get() {
            return Err(ApiError::Rejected {
                status: 403,
                message: "row-level security violation".to_owned(),
            });
        }
        self.profiles.borrow_mut().retain(|p| p.id != id);
        Ok(())
    }
}
