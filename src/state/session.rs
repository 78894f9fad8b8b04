//! Session store: the current authentication identity plus change
//! subscriptions.
//!
//! SYSTEM CONTEXT
//! ==============
//! One store instance lives in app context. The root component bridges it
//! into a signal; sign-in and sign-out flows push transitions through it so
//! every dependent derivation observes the same ordered sequence.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, Weak};

use uuid::Uuid;

use crate::net::types::Session;

/// Point-in-time view of the session state.
///
/// `resolved` is false until the initial remote lookup lands, so dependents
/// can tell "still determining" apart from "determined absent".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionSnapshot {
    pub resolved: bool,
    pub session: Option<Session>,
}

impl SessionSnapshot {
    #[must_use]
    pub fn authenticated(&self) -> bool {
        self.session.is_some()
    }

    #[must_use]
    pub fn user_id(&self) -> Option<Uuid> {
        self.session.as_ref().map(|s| s.user_id)
    }
}

type Listener = Arc<dyn Fn(&SessionSnapshot) + Send + Sync>;

#[derive(Default)]
struct Inner {
    current: SessionSnapshot,
    next_key: u64,
    listeners: BTreeMap<u64, Listener>,
}

/// Shared session store. Cloning yields another handle to the same store.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<Inner>>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.lock().expect("session store poisoned").current.clone()
    }

    /// Replace the current session and notify subscribers in subscription
    /// order. Marks the store resolved: passing `None` is how both explicit
    /// sign-out and a failed initial lookup land in the deterministic
    /// "no session" state.
    pub fn set_session(&self, session: Option<Session>) {
        let (snapshot, listeners) = {
            let mut inner = self.inner.lock().expect("session store poisoned");
            inner.current = SessionSnapshot {
                resolved: true,
                session,
            };
            (
                inner.current.clone(),
                inner.listeners.values().cloned().collect::<Vec<_>>(),
            )
        };
        for listener in listeners {
            listener(&snapshot);
        }
    }

    /// Register a listener. The current snapshot is delivered synchronously
    /// exactly once before any change notification, so subscribers never
    /// observe an indeterminate state.
    pub fn subscribe(
        &self,
        listener: impl Fn(&SessionSnapshot) + Send + Sync + 'static,
    ) -> SessionSubscription {
        let listener: Listener = Arc::new(listener);
        let (key, snapshot) = {
            let mut inner = self.inner.lock().expect("session store poisoned");
            let key = inner.next_key;
            inner.next_key += 1;
            inner.listeners.insert(key, listener.clone());
            (key, inner.current.clone())
        };
        listener(&snapshot);
        SessionSubscription {
            store: Arc::downgrade(&self.inner),
            key,
        }
    }

    #[cfg(test)]
    fn listener_count(&self) -> usize {
        self.inner.lock().expect("session store poisoned").listeners.len()
    }
}

/// Handle owning one subscription. Dropping it unsubscribes; explicit
/// `unsubscribe` is idempotent.
pub struct SessionSubscription {
    store: Weak<Mutex<Inner>>,
    key: u64,
}

impl SessionSubscription {
    pub fn unsubscribe(&self) {
        if let Some(inner) = self.store.upgrade() {
            inner
                .lock()
                .expect("session store poisoned")
                .listeners
                .remove(&self.key);
        }
    }
}

impl Drop for SessionSubscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
