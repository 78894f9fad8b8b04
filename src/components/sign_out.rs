//! Sign-out button shared by the authenticated screens.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::net::backend::SharedBackend;
use crate::state::session::SessionStore;

/// Revokes the session remotely, clears the store, and returns to the
/// login screen. The control is disabled while the call is in flight.
#[component]
pub fn SignOutButton() -> impl IntoView {
    let backend = expect_context::<SharedBackend>();
    let store = expect_context::<SessionStore>();
    let navigate = use_navigate();
    let busy = RwSignal::new(false);

    let on_click = move |_| {
        if busy.get() {
            return;
        }
        busy.set(true);
        #[cfg(feature = "csr")]
        {
            let backend = backend.clone();
            let store = store.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                if let Err(e) = backend.sign_out().await {
                    log::warn!("sign-out failed: {e}");
                }
                store.set_session(None);
                busy.set(false);
                navigate("/login", leptos_router::NavigateOptions::default());
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (&backend, &store, &navigate);
            busy.set(false);
        }
    };

    view! {
        <button class="btn btn--danger" on:click=on_click disabled=move || busy.get()>
            "Sign out"
        </button>
    }
}
