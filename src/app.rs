//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::components::guard::{RequireAdmin, RequireAuth};
use crate::config::Config;
use crate::net::backend::SharedBackend;
use crate::net::http::HttpBackend;
use crate::pages::{admin_users::AdminUsersPage, dashboard::DashboardPage, login::LoginPage};
use crate::state::gate::GateState;
use crate::state::session::{SessionSnapshot, SessionStore};

/// Root component.
///
/// Provides the backend connection, the session store, and the derived
/// gate state, then sets up client-side routing with the guards composed
/// authentication-first.
#[component]
pub fn App(config: Config) -> impl IntoView {
    provide_meta_context();

    let backend: SharedBackend = Arc::new(HttpBackend::new(config));
    provide_context(backend.clone());

    let store = SessionStore::new();
    provide_context(store.clone());

    // Bridge the store into the reactive graph. The subscription delivers
    // the current snapshot immediately, then every later transition; the
    // handle is released when the app unmounts.
    let session = RwSignal::new(SessionSnapshot::default());
    let subscription = store.subscribe(move |snapshot| session.set(snapshot.clone()));
    on_cleanup(move || subscription.unsubscribe());
    provide_context(session);

    let gate = RwSignal::new(GateState::default());
    provide_context(gate);

    // Privilege derivation: every session transition re-enters loading and
    // issues an epoch-tagged lookup; stale responses are dropped.
    {
        let backend = backend.clone();
        Effect::new(move || {
            let snapshot = session.get();
            let lookup = gate.try_update(|g| g.apply_session(&snapshot)).flatten();
            if let (Some(epoch), Some(user_id)) = (lookup, snapshot.user_id()) {
                let backend = backend.clone();
                #[cfg(feature = "csr")]
                leptos::task::spawn_local(async move {
                    let result = backend
                        .fetch_profile(user_id)
                        .await
                        .map(|profile| profile.is_admin)
                        .map_err(|e| e.to_string());
                    gate.update(|g| g.apply_admin_result(epoch, result));
                });
                #[cfg(not(feature = "csr"))]
                let _ = (backend, epoch, user_id);
            }
        });
    }

    // Initial session resolution: a failed lookup still resolves the store
    // to the deterministic "no session" state.
    {
        let backend = backend.clone();
        let store = store.clone();
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            match backend.get_session().await {
                Ok(current) => store.set_session(current),
                Err(e) => {
                    log::warn!("initial session lookup failed: {e}");
                    store.set_session(None);
                }
            }
        });
        #[cfg(not(feature = "csr"))]
        let _ = (backend, store);
    }

    view! {
        <Stylesheet id="leptos" href="/styles.css"/>
        <Title text="Roster"/>

        <Router>
            <Routes fallback=|| view! { <Redirect path="/"/> }>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route
                    path=StaticSegment("")
                    view=|| {
                        view! {
                            <RequireAuth>
                                <DashboardPage/>
                            </RequireAuth>
                        }
                    }
                />
                <Route
                    path=(StaticSegment("admin"), StaticSegment("users"))
                    view=|| {
                        view! {
                            <RequireAuth>
                                <RequireAdmin>
                                    <AdminUsersPage/>
                                </RequireAdmin>
                            </RequireAuth>
                        }
                    }
                />
            </Routes>
        </Router>
    }
}
