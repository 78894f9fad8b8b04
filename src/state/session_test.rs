use std::sync::{Arc, Mutex};

use super::*;
use crate::net::backend::Backend;
use crate::net::fake;

fn recording() -> (
    Arc<Mutex<Vec<SessionSnapshot>>>,
    impl Fn(&SessionSnapshot) + Send + Sync + 'static,
) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = {
        let log = Arc::clone(&log);
        move |snapshot: &SessionSnapshot| log.lock().unwrap().push(snapshot.clone())
    };
    (log, sink)
}

// =============================================================
// Subscription delivery
// =============================================================

#[test]
fn subscribe_delivers_current_state_exactly_once() {
    let store = SessionStore::new();
    let (log, sink) = recording();

    let _sub = store.subscribe(sink);

    let entries = log.lock().unwrap();
    assert_eq!(entries.len(), 1);
    assert!(!entries[0].resolved);
    assert!(entries[0].session.is_none());
}

#[test]
fn late_subscriber_gets_latest_state_not_a_replay() {
    let store = SessionStore::new();
    store.set_session(Some(fake::session(1)));
    store.set_session(None);

    let (log, sink) = recording();
    let _sub = store.subscribe(sink);

    let entries = log.lock().unwrap();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].resolved);
    assert!(entries[0].session.is_none());
}

#[test]
fn subscriber_sees_every_transition_in_order() {
    let store = SessionStore::new();
    let (log, sink) = recording();
    let _sub = store.subscribe(sink);

    store.set_session(Some(fake::session(1)));
    store.set_session(None);
    store.set_session(Some(fake::session(2)));

    let entries = log.lock().unwrap();
    let authenticated: Vec<bool> = entries.iter().map(SessionSnapshot::authenticated).collect();
    assert_eq!(authenticated, vec![false, true, false, true]);
    assert_eq!(
        entries.last().unwrap().user_id(),
        Some(fake::session(2).user_id)
    );
}

// =============================================================
// Unsubscribe semantics
// =============================================================

#[test]
fn unsubscribe_stops_all_further_delivery() {
    let store = SessionStore::new();
    let (log, sink) = recording();
    let sub = store.subscribe(sink);

    sub.unsubscribe();
    store.set_session(Some(fake::session(1)));

    assert_eq!(log.lock().unwrap().len(), 1);
    assert_eq!(store.listener_count(), 0);
}

#[test]
fn unsubscribe_is_idempotent() {
    let store = SessionStore::new();
    let (log, sink) = recording();
    let sub = store.subscribe(sink);

    sub.unsubscribe();
    sub.unsubscribe();

    // A fresh subscription after repeated unsubscribes gets exactly one
    // initial delivery and one per change — no duplicates.
    let (log2, sink2) = recording();
    let _sub2 = store.subscribe(sink2);
    store.set_session(None);

    assert_eq!(log.lock().unwrap().len(), 1);
    assert_eq!(log2.lock().unwrap().len(), 2);
    assert_eq!(store.listener_count(), 1);
}

#[test]
fn dropping_the_handle_unsubscribes() {
    let store = SessionStore::new();
    let (log, sink) = recording();
    {
        let _sub = store.subscribe(sink);
    }
    store.set_session(Some(fake::session(1)));

    assert_eq!(log.lock().unwrap().len(), 1);
    assert_eq!(store.listener_count(), 0);
}

// =============================================================
// Failure-path resolution
// =============================================================

#[test]
fn failed_initial_lookup_still_resolves_to_absent() {
    // The startup glue maps a failed remote lookup to `set_session(None)`;
    // the store must land in a deterministic resolved state, never hang
    // unresolved.
    let backend = fake::FakeBackend::new();
    backend.fail_session.set(true);
    let store = SessionStore::new();

    match futures::executor::block_on(backend.get_session()) {
        Ok(current) => store.set_session(current),
        Err(_) => store.set_session(None),
    }

    let snapshot = store.snapshot();
    assert!(snapshot.resolved);
    assert!(!snapshot.authenticated());
}
