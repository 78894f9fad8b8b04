//! Profile directory state for the user-management screen.
//!
//! DESIGN
//! ======
//! The collection mirrors the remote `profiles` table in creation order.
//! Mutations patch it in place only after the remote call confirms, so the
//! table never shows a state the backend rejected. List refreshes carry a
//! sequence number; a response that lost the race to a newer one is
//! discarded instead of overwriting it.

#[cfg(test)]
#[path = "profiles_test.rs"]
mod profiles_test;

use uuid::Uuid;

use crate::net::error::ApiError;
use crate::net::types::{Profile, ProfileChanges};

/// Ordered profile collection plus load/error surfaces.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfilesState {
    /// Rows in remote creation order.
    pub items: Vec<Profile>,
    pub loading: bool,
    pub error: Option<String>,
    issued_seq: u64,
    applied_seq: u64,
}

impl ProfilesState {
    /// Start a list refresh; returns the sequence number tagging it.
    pub fn begin_load(&mut self) -> u64 {
        self.issued_seq += 1;
        self.loading = true;
        self.error = None;
        self.issued_seq
    }

    /// Apply a refresh response. A response older than the newest applied
    /// one is dropped, so a slow fetch can never overwrite a fresher list.
    pub fn apply_loaded(&mut self, seq: u64, result: Result<Vec<Profile>, ApiError>) {
        if seq <= self.applied_seq {
            return;
        }
        self.applied_seq = seq;
        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                self.error = None;
            }
            Err(reason) => {
                self.items.clear();
                self.error = Some(reason.to_string());
            }
        }
    }

    /// Apply the outcome of an update call. The row is patched in place,
    /// preserving order, only when the call succeeded; on rejection the
    /// collection is untouched and the reason is surfaced. Returns whether
    /// the update took effect.
    pub fn apply_update_outcome(
        &mut self,
        id: Uuid,
        changes: &ProfileChanges,
        result: Result<(), ApiError>,
    ) -> bool {
        match result {
            Ok(()) => {
                if let Some(profile) = self.items.iter_mut().find(|p| p.id == id) {
                    changes.apply_to(profile);
                }
                true
            }
            Err(reason) => {
                self.error = Some(reason.to_string());
                false
            }
        }
    }

    /// Apply the outcome of a delete call: removes exactly the matching
    /// row, preserving the relative order of the remainder. Returns whether
    /// the delete took effect.
    pub fn apply_delete_outcome(&mut self, id: Uuid, result: Result<(), ApiError>) -> bool {
        match result {
            Ok(()) => {
                self.items.retain(|p| p.id != id);
                true
            }
            Err(reason) => {
                self.error = Some(reason.to_string());
                false
            }
        }
    }
}
