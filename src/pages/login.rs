//! Login page: email/password sign-in and sign-up.
//!
//! ERROR HANDLING
//! ==============
//! Remote failures surface as inline messages; sign-up may complete
//! without a session (confirmation email pending), which is a notice, not
//! an error. The submit control is disabled while a call is in flight.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::net::backend::SharedBackend;
#[cfg(any(test, feature = "csr"))]
use crate::net::types::SignUpOutcome;
use crate::state::session::SessionStore;

/// Minimum password length accepted by the auth service.
const MIN_PASSWORD_CHARS: usize = 6;

/// Notice shown when sign-up completed without an immediate session.
#[cfg(any(test, feature = "csr"))]
const CONFIRMATION_NOTICE: &str =
    "Account created. Check your email to confirm it, then sign in.";

/// Whether a sign-up outcome still needs the email-confirmation step.
#[cfg(any(test, feature = "csr"))]
fn needs_confirmation(outcome: &SignUpOutcome) -> bool {
    outcome.session.is_none()
}

/// Validate the credential form, returning trimmed email plus password.
fn validate_credentials(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() {
        return Err("Enter your email address.");
    }
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err("Password must be at least 6 characters.");
    }
    Ok((email.to_owned(), password.to_owned()))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let backend = expect_context::<SharedBackend>();
    let store = expect_context::<SessionStore>();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let sign_up_mode = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        error.set(None);
        notice.set(None);
        let (email_value, password_value) =
            match validate_credentials(&email.get(), &password.get()) {
                Ok(values) => values,
                Err(reason) => {
                    error.set(Some(reason.to_owned()));
                    return;
                }
            };
        busy.set(true);

        #[cfg(feature = "csr")]
        {
            let backend = backend.clone();
            let store = store.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                if sign_up_mode.get_untracked() {
                    match backend.sign_up(&email_value, &password_value).await {
                        Ok(outcome) => {
                            if needs_confirmation(&outcome) {
                                notice.set(Some(CONFIRMATION_NOTICE.to_owned()));
                            } else if let Some(session) = outcome.session {
                                store.set_session(Some(session));
                                navigate("/", leptos_router::NavigateOptions::default());
                            }
                        }
                        Err(e) => error.set(Some(e.to_string())),
                    }
                } else {
                    match backend.sign_in(&email_value, &password_value).await {
                        Ok(session) => {
                            store.set_session(Some(session));
                            navigate("/", NavigateOptions::default());
                        }
                        Err(e) => error.set(Some(e.to_string())),
                    }
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (&backend, &store, &navigate, email_value, password_value);
            busy.set(false);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Roster"</h1>
                <p class="login-card__subtitle">
                    {move || {
                        if sign_up_mode.get() {
                            "Create an account"
                        } else {
                            "Sign in to your account"
                        }
                    }}
                </p>
                <form class="login-form" on:submit=on_submit>
                    <label class="login-label">
                        "Email"
                        <input
                            class="login-input"
                            type="email"
                            placeholder="you@example.com"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="login-label">
                        "Password"
                        <input
                            class="login-input"
                            type="password"
                            placeholder="••••••••"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                    </label>
                    <Show when=move || error.get().is_some()>
                        <p class="login-message login-message--error">
                            {move || error.get().unwrap_or_default()}
                        </p>
                    </Show>
                    <Show when=move || notice.get().is_some()>
                        <p class="login-message login-message--notice">
                            {move || notice.get().unwrap_or_default()}
                        </p>
                    </Show>
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || {
                            if busy.get() {
                                "Working..."
                            } else if sign_up_mode.get() {
                                "Create account"
                            } else {
                                "Sign in"
                            }
                        }}
                    </button>
                </form>
                <button
                    class="login-switch"
                    type="button"
                    on:click=move |_| {
                        sign_up_mode.update(|m| *m = !*m);
                        error.set(None);
                        notice.set(None);
                    }
                >
                    {move || {
                        if sign_up_mode.get() {
                            "Already have an account? Sign in"
                        } else {
                            "No account yet? Create one"
                        }
                    }}
                </button>
            </div>
        </div>
    }
}
