//! Self-profile state for the dashboard.
//!
//! Same load/outcome discipline as the directory state, scoped to the one
//! row belonging to the current session.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use crate::net::error::ApiError;
use crate::net::types::Profile;

/// The caller's own profile plus load/error surfaces.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileState {
    pub profile: Option<Profile>,
    pub loading: bool,
    pub error: Option<String>,
    issued_seq: u64,
    applied_seq: u64,
}

impl ProfileState {
    /// Start a profile fetch; returns the sequence number tagging it.
    pub fn begin_load(&mut self) -> u64 {
        self.issued_seq += 1;
        self.loading = true;
        self.error = None;
        self.issued_seq
    }

    /// Apply a fetch response, dropping responses that lost the race to a
    /// newer one.
    pub fn apply_loaded(&mut self, seq: u64, result: Result<Profile, ApiError>) {
        if seq <= self.applied_seq {
            return;
        }
        self.applied_seq = seq;
        self.loading = false;
        match result {
            Ok(profile) => {
                self.profile = Some(profile);
                self.error = None;
            }
            Err(reason) => {
                self.profile = None;
                self.error = Some(reason.to_string());
            }
        }
    }

    /// Apply the outcome of a display-name update: the local copy is
    /// patched only after the remote call confirmed. Returns whether the
    /// rename took effect.
    pub fn apply_rename_outcome(&mut self, user_name: &str, result: Result<(), ApiError>) -> bool {
        match result {
            Ok(()) => {
                if let Some(profile) = &mut self.profile {
                    profile.user_name = user_name.to_owned();
                }
                true
            }
            Err(reason) => {
                self.error = Some(reason.to_string());
                false
            }
        }
    }

    /// Back to the signed-out blank state.
    pub fn reset(&mut self) {
        let seq = self.issued_seq;
        *self = Self::default();
        // Keep the counter monotonic so a late response from before the
        // reset still reads as stale.
        self.issued_seq = seq;
        self.applied_seq = seq;
    }
}
