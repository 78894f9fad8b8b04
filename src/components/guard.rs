//! Route-guard components composing the authorization gate.
//!
//! SYSTEM CONTEXT
//! ==============
//! Guards wrap protected route views. While a gate derivation is still
//! loading they render an indeterminate placeholder — never the protected
//! content, never the fallback — so privileged content cannot flash before
//! the privilege lookup resolves. The two redirect destinations are
//! distinct on purpose: unauthenticated goes to the login screen,
//! unprivileged goes to the default authenticated screen.

use leptos::prelude::*;
use leptos_router::components::Redirect;

use crate::state::gate::{GateState, RouteCheck, check_admin, check_authenticated};

/// Indeterminate placeholder shown while the gate is deciding.
#[component]
fn GatePending() -> impl IntoView {
    view! {
        <div class="gate-pending">
            <div class="gate-pending__spinner"></div>
        </div>
    }
}

/// Authentication guard: renders children only with a present session.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let gate = expect_context::<RwSignal<GateState>>();
    view! {
        {move || match check_authenticated(&gate.get()) {
            RouteCheck::Pending => view! { <GatePending/> }.into_any(),
            RouteCheck::Redirect(path) => view! { <Redirect path=path/> }.into_any(),
            RouteCheck::Grant => children(),
        }}
    }
}

/// Privilege guard: composed inside [`RequireAuth`], renders children only
/// when the session's profile carries `is_admin`.
#[component]
pub fn RequireAdmin(children: ChildrenFn) -> impl IntoView {
    let gate = expect_context::<RwSignal<GateState>>();
    view! {
        {move || match check_admin(&gate.get()) {
            RouteCheck::Pending => view! { <GatePending/> }.into_any(),
            RouteCheck::Redirect(path) => view! { <Redirect path=path/> }.into_any(),
            RouteCheck::Grant => children(),
        }}
    }
}
