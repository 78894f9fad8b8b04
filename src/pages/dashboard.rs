//! Dashboard page: the authenticated landing screen.
//!
//! Shows the caller's profile with self-service display-name editing, and
//! the management entry point when the gate grants privilege. Profile and
//! privilege errors surface independently — a failed privilege lookup
//! never masquerades as a profile (or authentication) failure.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use leptos_router::components::A;
use uuid::Uuid;

use crate::components::sign_out::SignOutButton;
use crate::net::backend::SharedBackend;
use crate::net::types::{Profile, ProfileChanges};
use crate::state::gate::GateState;
use crate::state::profile::ProfileState;
use crate::state::session::SessionSnapshot;
use crate::util::format::created_date;

/// Header label: display name when set, else email.
fn user_label(profile: Option<&Profile>) -> String {
    match profile {
        Some(p) if !p.user_name.is_empty() => p.user_name.clone(),
        Some(p) => p.email.clone(),
        None => "—".to_owned(),
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let backend = expect_context::<SharedBackend>();
    let session = expect_context::<RwSignal<SessionSnapshot>>();
    let gate = expect_context::<RwSignal<GateState>>();

    let profile = RwSignal::new(ProfileState::default());
    // Draft display name while the edit row is open.
    let draft = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    let load_profile = {
        let backend = backend.clone();
        move |user_id: Uuid| {
            let seq = profile.try_update(|p| p.begin_load()).unwrap_or_default();
            let backend = backend.clone();
            #[cfg(feature = "csr")]
            leptos::task::spawn_local(async move {
                let result = backend.fetch_profile(user_id).await;
                profile.update(|p| p.apply_loaded(seq, result));
            });
            #[cfg(not(feature = "csr"))]
            let _ = (backend, seq, user_id);
        }
    };

    // Follow every session transition: fetch on sign-in, blank on sign-out.
    {
        let load_profile = load_profile.clone();
        Effect::new(move || {
            let snapshot = session.get();
            if let Some(user_id) = snapshot.user_id() {
                load_profile(user_id);
            } else if snapshot.resolved {
                profile.update(ProfileState::reset);
            }
        });
    }

    let on_reload = {
        let load_profile = load_profile.clone();
        move |_| {
            if let Some(user_id) = session.get_untracked().user_id() {
                load_profile(user_id);
            }
        }
    };

    let on_save_name = {
        let backend = backend.clone();
        move |_| {
            if saving.get() {
                return;
            }
            let Some(name) = draft.get_untracked() else {
                return;
            };
            let name = name.trim().to_owned();
            let Some(user_id) = session.get_untracked().user_id() else {
                return;
            };
            saving.set(true);
            #[cfg(feature = "csr")]
            {
                let backend = backend.clone();
                leptos::task::spawn_local(async move {
                    let changes = ProfileChanges::rename(name.clone());
                    let result = backend.update_profile(user_id, &changes).await;
                    let ok = profile
                        .try_update(|p| p.apply_rename_outcome(&name, result))
                        .unwrap_or(false);
                    if ok {
                        draft.set(None);
                    }
                    saving.set(false);
                });
            }
            #[cfg(not(feature = "csr"))]
            {
                let _ = (&backend, name, user_id);
                saving.set(false);
            }
        }
    };

    view! {
        <div class="dashboard-page">
            <header class="page-header">
                <div class="page-header__brand">
                    <span class="page-header__logo">"R"</span>
                    <h1>"Roster"</h1>
                    <Show when=move || gate.get().admin_granted()>
                        <span class="badge badge--admin">"Admin"</span>
                    </Show>
                </div>
                <div class="page-header__user">
                    <span class="page-header__user-label">
                        {move || user_label(profile.get().profile.as_ref())}
                    </span>
                    <SignOutButton/>
                </div>
            </header>

            <main class="dashboard-page__main">
                <section class="card card--welcome">
                    <h2>"Welcome back"</h2>
                    <p>
                        {move || {
                            if gate.get().admin_granted() {
                                "You are signed in with administrator access."
                            } else {
                                "You are signed in."
                            }
                        }}
                    </p>
                    <Show when=move || gate.get().admin_error().is_some()>
                        <p class="card__error">
                            {move || {
                                gate.get()
                                    .admin_error()
                                    .map(|reason| format!("Privilege check failed: {reason}"))
                                    .unwrap_or_default()
                            }}
                        </p>
                    </Show>
                </section>

                <Show when=move || gate.get().admin_granted()>
                    <section class="card card--admin-link">
                        <h3>"User management"</h3>
                        <p>"Review, edit, and remove registered users."</p>
                        <p class="card__actions">
                            <A href="/admin/users">"Open user management"</A>
                        </p>
                    </section>
                </Show>

                <section class="card card--profile">
                    <h2>"Profile"</h2>

                    <Show when=move || profile.get().loading>
                        <p class="card__pending">"Loading profile..."</p>
                    </Show>

                    <Show when=move || profile.get().error.is_some()>
                        <div class="card__error">
                            <p>
                                {move || {
                                    profile
                                        .get()
                                        .error
                                        .map(|reason| {
                                            format!("Could not load your profile: {reason}")
                                        })
                                        .unwrap_or_default()
                                }}
                            </p>
                            <button class="btn" on:click=on_reload.clone()>"Reload"</button>
                        </div>
                    </Show>

                    <Show when=move || {
                        let state = profile.get();
                        !state.loading && state.profile.is_some()
                    }>
                        <div class="profile-rows">
                            <div class="profile-row">
                                <span class="profile-row__label">"Email"</span>
                                <span class="profile-row__value">
                                    {move || {
                                        profile.get().profile.map(|p| p.email).unwrap_or_default()
                                    }}
                                </span>
                            </div>
                            <div class="profile-row">
                                <span class="profile-row__label">"Display name"</span>
                                {
                                    let on_save_name = on_save_name.clone();
                                    view! {
                                <Show
                                    when=move || draft.get().is_some()
                                    fallback=move || {
                                        view! {
                                            <span class="profile-row__edit">
                                                <span class="profile-row__value">
                                                    {move || {
                                                        let name = profile
                                                            .get()
                                                            .profile
                                                            .map(|p| p.user_name)
                                                            .unwrap_or_default();
                                                        if name.is_empty() {
                                                            "Not set".to_owned()
                                                        } else {
                                                            name
                                                        }
                                                    }}
                                                </span>
                                                <button
                                                    class="btn"
                                                    on:click=move |_| {
                                                        let current = profile
                                                            .get_untracked()
                                                            .profile
                                                            .map(|p| p.user_name)
                                                            .unwrap_or_default();
                                                        draft.set(Some(current));
                                                    }
                                                >
                                                    "Edit"
                                                </button>
                                            </span>
                                        }
                                    }
                                >
                                    <span class="profile-row__edit">
                                        <input
                                            class="profile-row__input"
                                            type="text"
                                            placeholder="Display name"
                                            prop:value=move || draft.get().unwrap_or_default()
                                            on:input=move |ev| {
                                                draft.set(Some(event_target_value(&ev)));
                                            }
                                        />
                                        <button
                                            class="btn btn--primary"
                                            disabled=move || saving.get()
                                            on:click=on_save_name.clone()
                                        >
                                            {move || if saving.get() { "Saving..." } else { "Save" }}
                                        </button>
                                        <button
                                            class="btn"
                                            disabled=move || saving.get()
                                            on:click=move |_| draft.set(None)
                                        >
                                            "Cancel"
                                        </button>
                                    </span>
                                </Show>
                                    }
                                }
                            </div>
                            <div class="profile-row">
                                <span class="profile-row__label">"Privilege"</span>
                                <span class="profile-row__value">
                                    {move || {
                                        if profile
                                            .get()
                                            .profile
                                            .map(|p| p.is_admin)
                                            .unwrap_or(false)
                                        {
                                            "Administrator"
                                        } else {
                                            "Member"
                                        }
                                    }}
                                </span>
                            </div>
                            <div class="profile-row">
                                <span class="profile-row__label">"User ID"</span>
                                <span class="profile-row__value profile-row__value--mono">
                                    {move || {
                                        profile
                                            .get()
                                            .profile
                                            .map(|p| p.id.to_string())
                                            .unwrap_or_default()
                                    }}
                                </span>
                            </div>
                            <div class="profile-row">
                                <span class="profile-row__label">"Registered"</span>
                                <span class="profile-row__value">
                                    {move || {
                                        profile
                                            .get()
                                            .profile
                                            .map(|p| created_date(&p.created_at).to_owned())
                                            .unwrap_or_default()
                                    }}
                                </span>
                            </div>
                        </div>
                    </Show>
                </section>
            </main>
        </div>
    }
}
