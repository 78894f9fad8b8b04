use futures::executor::block_on;
use uuid::Uuid;

use super::*;
use crate::net::backend::Backend;
use crate::net::fake::{self, FakeBackend};

fn loaded(profiles: Vec<Profile>) -> ProfilesState {
    let mut state = ProfilesState::default();
    let seq = state.begin_load();
    state.apply_loaded(seq, Ok(profiles));
    state
}

fn ids(state: &ProfilesState) -> Vec<Uuid> {
    state.items.iter().map(|p| p.id).collect()
}

// =============================================================
// List refresh
// =============================================================

#[test]
fn loaded_list_preserves_remote_order() {
    let state = loaded(vec![fake::profile(1, true), fake::profile(2, false), fake::profile(3, false)]);

    assert_eq!(
        ids(&state),
        vec![
            Uuid::from_u128(1),
            Uuid::from_u128(2),
            Uuid::from_u128(3)
        ]
    );
    assert!(!state.loading);
    assert!(state.error.is_none());
}

#[test]
fn failed_refresh_clears_items_and_surfaces_reason() {
    let backend = FakeBackend::with_profiles(vec![fake::profile(1, false)]);
    backend.fail_list.set(true);

    let mut state = loaded(vec![fake::profile(1, false)]);
    let seq = state.begin_load();
    let result = block_on(backend.fetch_profiles());
    state.apply_loaded(seq, result);

    assert!(state.items.is_empty());
    assert_eq!(
        state.error.as_deref(),
        Some("network error: connection refused")
    );
}

#[test]
fn begin_load_clears_previous_error() {
    let mut state = ProfilesState::default();
    let seq = state.begin_load();
    state.apply_loaded(seq, Err(ApiError::Network("down".to_owned())));
    assert!(state.error.is_some());

    state.begin_load();
    assert!(state.error.is_none());
    assert!(state.loading);
}

#[test]
fn stale_refresh_response_is_discarded() {
    let mut state = ProfilesState::default();
    let first = state.begin_load();
    let second = state.begin_load();

    state.apply_loaded(second, Ok(vec![fake::profile(2, false)]));
    // The older request resolves late: dropped, not applied.
    state.apply_loaded(first, Ok(vec![fake::profile(1, false)]));

    assert_eq!(ids(&state), vec![Uuid::from_u128(2)]);
}

#[test]
fn in_order_responses_apply_normally() {
    let mut state = ProfilesState::default();
    let first = state.begin_load();
    let second = state.begin_load();

    state.apply_loaded(first, Ok(vec![fake::profile(1, false)]));
    state.apply_loaded(second, Ok(vec![fake::profile(2, false)]));

    assert_eq!(ids(&state), vec![Uuid::from_u128(2)]);
}

// =============================================================
// Updates: confirmed-success patching
// =============================================================

#[test]
fn update_patches_locally_only_after_remote_success() {
    let backend = FakeBackend::with_profiles(vec![fake::profile(1, false), fake::profile(2, false)]);
    let mut state = loaded(block_on(backend.fetch_profiles()).unwrap());
    let id = Uuid::from_u128(2);
    let changes = ProfileChanges::rename("Renamed");

    let result = block_on(backend.update_profile(id, &changes));
    // Nothing is patched before the outcome is applied.
    assert_eq!(state.items[1].user_name, "User 2");

    assert!(state.apply_update_outcome(id, &changes, result));
    assert_eq!(state.items[1].user_name, "Renamed");
}

#[test]
fn rejected_update_leaves_collection_untouched() {
    let backend = FakeBackend::with_profiles(vec![fake::profile(1, false)]);
    backend.fail_update.set(true);
    let mut state = loaded(block_on(backend.fetch_profiles()).unwrap());
    let before = state.items.clone();
    let id = Uuid::from_u128(1);
    let changes = ProfileChanges::rename("Renamed");

    let result = block_on(backend.update_profile(id, &changes));
    assert!(!state.apply_update_outcome(id, &changes, result));

    assert_eq!(state.items, before);
    assert_eq!(state.error.as_deref(), Some("row-level security violation"));
}

#[test]
fn update_patches_in_place_without_reordering() {
    let mut state = loaded(vec![
        fake::profile(1, false),
        fake::profile(2, false),
        fake::profile(3, false),
    ]);
    let id = Uuid::from_u128(2);
    let changes = ProfileChanges {
        user_name: Some("Middle".to_owned()),
        is_admin: Some(true),
    };

    assert!(state.apply_update_outcome(id, &changes, Ok(())));

    assert_eq!(
        ids(&state),
        vec![
            Uuid::from_u128(1),
            Uuid::from_u128(2),
            Uuid::from_u128(3)
        ]
    );
    assert_eq!(state.items[1].user_name, "Middle");
    assert!(state.items[1].is_admin);
}

#[test]
fn last_arriving_update_wins_on_the_same_row() {
    // Two rapid updates on one id: whichever response is applied last
    // determines the final state, regardless of call order. Accepted,
    // non-strictly-ordered behavior.
    let id = Uuid::from_u128(1);
    let first = ProfileChanges::rename("First");
    let second = ProfileChanges::rename("Second");

    let mut state = loaded(vec![fake::profile(1, false)]);
    state.apply_update_outcome(id, &first, Ok(()));
    state.apply_update_outcome(id, &second, Ok(()));
    assert_eq!(state.items[0].user_name, "Second");

    let mut state = loaded(vec![fake::profile(1, false)]);
    state.apply_update_outcome(id, &second, Ok(()));
    state.apply_update_outcome(id, &first, Ok(()));
    assert_eq!(state.items[0].user_name, "First");
}

// =============================================================
// Deletes
// =============================================================

#[test]
fn delete_removes_exactly_one_row_preserving_order() {
    let backend = FakeBackend::with_profiles(vec![
        fake::profile(1, false),
        fake::profile(2, false),
        fake::profile(3, false),
    ]);
    let mut state = loaded(block_on(backend.fetch_profiles()).unwrap());
    let id = Uuid::from_u128(2);

    let result = block_on(backend.delete_profile(id));
    assert!(state.apply_delete_outcome(id, result));

    assert_eq!(ids(&state), vec![Uuid::from_u128(1), Uuid::from_u128(3)]);
}

#[test]
fn rejected_delete_keeps_the_row() {
    let backend = FakeBackend::with_profiles(vec![fake::profile(1, false)]);
    backend.fail_delete.set(true);
    let mut state = loaded(block_on(backend.fetch_profiles()).unwrap());
    let id = Uuid::from_u128(1);

    let result = block_on(backend.delete_profile(id));
    assert!(!state.apply_delete_outcome(id, result));

    assert_eq!(ids(&state), vec![Uuid::from_u128(1)]);
    assert!(state.error.is_some());
}
