//! User-management page (admin only).
//!
//! DESIGN
//! ======
//! The table mirrors the remote `profiles` collection in creation order.
//! Inline editing covers `user_name` and `is_admin`; deleting asks for a
//! second click. One `saving` flag disables every mutating control while a
//! call is in flight, so overlapping mutations on the same record cannot be
//! issued from this screen.

#[cfg(test)]
#[path = "admin_users_test.rs"]
mod admin_users_test;

use leptos::prelude::*;
use leptos_router::components::A;
use uuid::Uuid;

use crate::components::sign_out::SignOutButton;
use crate::net::backend::SharedBackend;
use crate::net::types::ProfileChanges;
use crate::state::profiles::ProfilesState;
use crate::state::session::SessionSnapshot;
use crate::util::format::{avatar_initial, created_date};

/// Row under inline edit.
#[derive(Clone, Debug, PartialEq, Eq)]
struct EditDraft {
    id: Uuid,
    user_name: String,
    is_admin: bool,
}

/// Update payload for a saved draft.
fn draft_changes(draft: &EditDraft) -> ProfileChanges {
    ProfileChanges {
        user_name: Some(draft.user_name.trim().to_owned()),
        is_admin: Some(draft.is_admin),
    }
}

/// Screen-layer policy: the repository does not guard self-deletion, so
/// every caller of `delete_profile` must apply this check itself.
fn can_delete_profile(row_id: Uuid, current_user: Option<Uuid>) -> bool {
    current_user != Some(row_id)
}

#[component]
pub fn AdminUsersPage() -> impl IntoView {
    let backend = expect_context::<SharedBackend>();
    let session = expect_context::<RwSignal<SessionSnapshot>>();

    let profiles = RwSignal::new(ProfilesState::default());
    let editing = RwSignal::new(None::<EditDraft>);
    let confirm_delete = RwSignal::new(None::<Uuid>);
    let saving = RwSignal::new(false);

    let refresh = {
        let backend = backend.clone();
        move || {
            let seq = profiles.try_update(|s| s.begin_load()).unwrap_or_default();
            let backend = backend.clone();
            #[cfg(feature = "csr")]
            leptos::task::spawn_local(async move {
                let result = backend.fetch_profiles().await;
                profiles.update(|s| s.apply_loaded(seq, result));
            });
            #[cfg(not(feature = "csr"))]
            let _ = (backend, seq);
        }
    };

    // This page only mounts once the gate granted admin access, so the
    // first list fetch cannot precede authorization.
    refresh();

    let on_reload = {
        let refresh = refresh.clone();
        move |_| refresh()
    };

    let on_save = {
        let backend = backend.clone();
        move |_| {
            if saving.get() {
                return;
            }
            let Some(current) = editing.get_untracked() else {
                return;
            };
            let changes = draft_changes(&current);
            saving.set(true);
            #[cfg(feature = "csr")]
            {
                let backend = backend.clone();
                leptos::task::spawn_local(async move {
                    let result = backend.update_profile(current.id, &changes).await;
                    let ok = profiles
                        .try_update(|s| s.apply_update_outcome(current.id, &changes, result))
                        .unwrap_or(false);
                    if ok {
                        editing.set(None);
                    }
                    saving.set(false);
                });
            }
            #[cfg(not(feature = "csr"))]
            {
                let _ = (&backend, current, changes);
                saving.set(false);
            }
        }
    };

    let on_confirm_delete = {
        let backend = backend.clone();
        move |id: Uuid| {
            if saving.get() {
                return;
            }
            saving.set(true);
            #[cfg(feature = "csr")]
            {
                let backend = backend.clone();
                leptos::task::spawn_local(async move {
                    let result = backend.delete_profile(id).await;
                    let ok = profiles
                        .try_update(|s| s.apply_delete_outcome(id, result))
                        .unwrap_or(false);
                    if ok {
                        confirm_delete.set(None);
                    }
                    saving.set(false);
                });
            }
            #[cfg(not(feature = "csr"))]
            {
                let _ = (&backend, id);
                saving.set(false);
            }
        }
    };

    view! {
        <div class="admin-page">
            <header class="page-header">
                <div class="page-header__brand">
                    <A href="/">"Back to menu"</A>
                    <h1>"User management"</h1>
                </div>
                <SignOutButton/>
            </header>

            <main class="admin-page__main">
                <Show when=move || profiles.get().error.is_some()>
                    <div class="banner banner--error">
                        <p>{move || profiles.get().error.unwrap_or_default()}</p>
                        <button class="btn" on:click=on_reload.clone()>"Reload"</button>
                    </div>
                </Show>

                <section class="card card--table">
                    <div class="card__heading">
                        <h2>"Registered users"</h2>
                        <span class="card__count">
                            {move || format!("{} registered", profiles.get().items.len())}
                        </span>
                    </div>

                    <Show when=move || profiles.get().loading>
                        <p class="card__pending">"Loading users..."</p>
                    </Show>

                    <Show when=move || {
                        let state = profiles.get();
                        !state.loading && state.items.is_empty() && state.error.is_none()
                    }>
                        <p class="card__empty">"No users registered."</p>
                    </Show>

                    <Show when=move || {
                        let state = profiles.get();
                        !state.loading && !state.items.is_empty()
                    }>
                        <table class="user-table">
                            <thead>
                                <tr>
                                    <th>"User"</th>
                                    <th>"Display name"</th>
                                    <th>"Privilege"</th>
                                    <th>"Registered"</th>
                                    <th>"Actions"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {
                                    let on_save = on_save.clone();
                                    let on_confirm_delete = on_confirm_delete.clone();
                                    move || {
                                    let state = profiles.get();
                                    let self_id = session.get().user_id();
                                    state
                                        .items
                                        .into_iter()
                                        .map(|p| {
                                            let id = p.id;
                                            let email = p.email.clone();
                                            let initial = avatar_initial(&p.email);
                                            let display_name = if p.user_name.is_empty() {
                                                "Not set".to_owned()
                                            } else {
                                                p.user_name.clone()
                                            };
                                            let row_name = p.user_name.clone();
                                            let row_admin = p.is_admin;
                                            let created = created_date(&p.created_at).to_owned();
                                            let is_self = self_id == Some(id);
                                            let deletable = can_delete_profile(id, self_id);
                                            let row_editing =
                                                move || editing.get().map(|d| d.id) == Some(id);
                                            let row_deleting =
                                                move || confirm_delete.get() == Some(id);
                                            let on_save = on_save.clone();
                                            let on_confirm_delete = on_confirm_delete.clone();

                                            view! {
                                                <tr class:user-table__row--self=is_self>
                                                    <td>
                                                        <div class="user-table__user">
                                                            <span class="user-table__avatar">
                                                                {initial}
                                                            </span>
                                                            <span>
                                                                {email}
                                                                <Show when=move || is_self>
                                                                    <span class="user-table__you">
                                                                        " (you)"
                                                                    </span>
                                                                </Show>
                                                            </span>
                                                        </div>
                                                    </td>
                                                    <td>
                                                        <Show
                                                            when=row_editing
                                                            fallback=move || display_name.clone()
                                                        >
                                                            <input
                                                                class="user-table__input"
                                                                type="text"
                                                                placeholder="Display name"
                                                                prop:value=move || {
                                                                    editing
                                                                        .get()
                                                                        .map(|d| d.user_name)
                                                                        .unwrap_or_default()
                                                                }
                                                                on:input=move |ev| {
                                                                    editing.update(|d| {
                                                                        if let Some(d) = d {
                                                                            d.user_name =
                                                                                event_target_value(&ev);
                                                                        }
                                                                    });
                                                                }
                                                            />
                                                        </Show>
                                                    </td>
                                                    <td>
                                                        <Show
                                                            when=row_editing
                                                            fallback=move || {
                                                                view! {
                                                                    <span
                                                                        class="badge"
                                                                        class:badge--admin=row_admin
                                                                    >
                                                                        {if row_admin {
                                                                            "Administrator"
                                                                        } else {
                                                                            "Member"
                                                                        }}
                                                                    </span>
                                                                }
                                                            }
                                                        >
                                                            <button
                                                                class="btn btn--toggle"
                                                                on:click=move |_| {
                                                                    editing.update(|d| {
                                                                        if let Some(d) = d {
                                                                            d.is_admin = !d.is_admin;
                                                                        }
                                                                    });
                                                                }
                                                            >
                                                                {move || {
                                                                    if editing
                                                                        .get()
                                                                        .map(|d| d.is_admin)
                                                                        .unwrap_or(false)
                                                                    {
                                                                        "Administrator"
                                                                    } else {
                                                                        "Member"
                                                                    }
                                                                }}
                                                            </button>
                                                        </Show>
                                                    </td>
                                                    <td class="user-table__date">{created}</td>
                                                    <td>
                                                        <div class="user-table__actions">
                                                            <Show when=row_editing>
                                                                <button
                                                                    class="btn btn--primary"
                                                                    disabled=move || saving.get()
                                                                    on:click=on_save.clone()
                                                                >
                                                                    {move || {
                                                                        if saving.get() {
                                                                            "Saving..."
                                                                        } else {
                                                                            "Save"
                                                                        }
                                                                    }}
                                                                </button>
                                                                <button
                                                                    class="btn"
                                                                    disabled=move || saving.get()
                                                                    on:click=move |_| editing.set(None)
                                                                >
                                                                    "Cancel"
                                                                </button>
                                                            </Show>
                                                            <Show when=move || {
                                                                row_deleting() && !row_editing()
                                                            }>
                                                                <span class="user-table__confirm">
                                                                    "Delete this user?"
                                                                </span>
                                                                <button
                                                                    class="btn btn--danger"
                                                                    disabled=move || saving.get()
                                                                    on:click={
                                                                        let on_confirm_delete =
                                                                            on_confirm_delete.clone();
                                                                        move |_| on_confirm_delete(id)
                                                                    }
                                                                >
                                                                    "Confirm"
                                                                </button>
                                                                <button
                                                                    class="btn"
                                                                    disabled=move || saving.get()
                                                                    on:click=move |_| {
                                                                        confirm_delete.set(None);
                                                                    }
                                                                >
                                                                    "Cancel"
                                                                </button>
                                                            </Show>
                                                            <Show when=move || {
                                                                !row_editing() && !row_deleting()
                                                            }>
                                                                <button
                                                                    class="btn"
                                                                    on:click={
                                                                        let row_name = row_name.clone();
                                                                        move |_| {
                                                                            editing.set(Some(EditDraft {
                                                                                id,
                                                                                user_name: row_name
                                                                                    .clone(),
                                                                                is_admin: row_admin,
                                                                            }));
                                                                            confirm_delete.set(None);
                                                                        }
                                                                    }
                                                                >
                                                                    "Edit"
                                                                </button>
                                                                <button
                                                                    class="btn btn--danger"
                                                                    disabled={!deletable}
                                                                    title={if deletable {
                                                                        "Delete"
                                                                    } else {
                                                                        "You cannot delete yourself"
                                                                    }}
                                                                    on:click=move |_| {
                                                                        if deletable {
                                                                            confirm_delete
                                                                                .set(Some(id));
                                                                            editing.set(None);
                                                                        }
                                                                    }
                                                                >
                                                                    "Delete"
                                                                </button>
                                                            </Show>
                                                        </div>
                                                    </td>
                                                </tr>
                                            }
                                        })
                                        .collect::<Vec<_>>()
                                }
                                }
                            </tbody>
                        </table>
                    </Show>
                </section>

                <section class="card card--notes">
                    <h3>"Notes"</h3>
                    <ul>
                        <li>"Email addresses cannot be changed."</li>
                        <li>"You cannot delete your own account."</li>
                        <li>"Deleted users can no longer sign in."</li>
                    </ul>
                </section>
            </main>
        </div>
    }
}
