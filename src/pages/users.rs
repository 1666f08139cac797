//! Admin-only user management page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Lists every user in the workspace and lets an admin promote members. A 401
//! from either call signs the client out; a 403 (role revoked server-side)
//! sends the user back to the dashboard.

#[cfg(test)]
#[path = "users_test.rs"]
mod users_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::app::AppUsers;
use crate::components::loading::Loading;
use crate::components::role_badge::RoleBadge;
use crate::components::route_guard::RouteGuard;
use crate::net::api::GatewayError;
use crate::net::types::{Role, UserSummary};
use crate::state::session::SessionStore;
use crate::util::errors::apply_disposition;
use crate::util::guard::Access;
use crate::util::mount::MountGuard;

/// Swap in the updated record; returns `false` if the user is not listed.
fn replace_user(users: &mut [UserSummary], updated: UserSummary) -> bool {
    match users.iter_mut().find(|u| u.id == updated.id) {
        Some(slot) => {
            *slot = updated;
            true
        }
        None => false,
    }
}

fn report_failure<N>(err: &GatewayError, session: SessionStore, navigate: &N, message: RwSignal<Option<String>>)
where
    N: Fn(&str, NavigateOptions),
{
    leptos::logging::warn!("user admin request failed: {err}");
    let shown = apply_disposition(err, &session, |path| navigate(path, NavigateOptions::default()));
    message.set(shown);
}

#[component]
pub fn UsersPage() -> impl IntoView {
    view! {
        <RouteGuard access=Access::AdminOnly>
            <UserAdminPanel/>
        </RouteGuard>
    }
}

#[component]
fn UserAdminPanel() -> impl IntoView {
    let session = expect_context::<SessionStore>();
    let api = expect_context::<AppUsers>();
    let navigate = use_navigate();
    let mount = MountGuard::install();

    let users = RwSignal::new(Vec::<UserSummary>::new());
    let loading = RwSignal::new(true);
    let message = RwSignal::new(None::<String>);
    let promoting = RwSignal::new(None::<String>);

    {
        let api = api.clone();
        let mount = mount.clone();
        let navigate = navigate.clone();
        crate::util::task::spawn(async move {
            let result = api.list_all().await;
            if !mount.is_mounted() {
                return;
            }
            match result {
                Ok(list) => users.set(list),
                Err(err) => report_failure(&err, session, &navigate, message),
            }
            loading.set(false);
        });
    }

    let on_promote = Callback::new(move |user_id: String| {
        if promoting.get_untracked().is_some() {
            return;
        }
        promoting.set(Some(user_id.clone()));
        message.set(None);
        let api = api.clone();
        let mount = mount.clone();
        let navigate = navigate.clone();
        crate::util::task::spawn(async move {
            let result = api.promote_to_admin(&user_id).await;
            if !mount.is_mounted() {
                return;
            }
            match result {
                Ok(updated) => {
                    let notice = format!("{} is now an admin.", updated.name);
                    users.update(|list| {
                        replace_user(list, updated);
                    });
                    message.set(Some(notice));
                }
                Err(err) => report_failure(&err, session, &navigate, message),
            }
            promoting.set(None);
        });
    });

    view! {
        <div class="users-page">
            <h1>"Users"</h1>
            <Show when=move || message.get().is_some()>
                <p class="users-page__message">{move || message.get().unwrap_or_default()}</p>
            </Show>
            <Show when=move || !loading.get() fallback=|| view! { <Loading label="Loading users..."/> }>
                <table class="users-table">
                    <thead>
                        <tr>
                            <th>"Name"</th>
                            <th>"Email"</th>
                            <th>"Role"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <For each=move || users.get() key=|u| (u.id.clone(), u.role) let:user>
                            <UserRow user=user promoting=promoting on_promote=on_promote/>
                        </For>
                    </tbody>
                </table>
            </Show>
        </div>
    }
}

#[component]
fn UserRow(user: UserSummary, promoting: RwSignal<Option<String>>, on_promote: Callback<String>) -> impl IntoView {
    let id = user.id.clone();
    let busy_id = id.clone();
    let busy = move || promoting.get().as_deref() == Some(busy_id.as_str());
    let is_member = user.role == Role::Member;

    view! {
        <tr>
            <td>{user.name}</td>
            <td>{user.email}</td>
            <td><RoleBadge role=user.role/></td>
            <td>
                <Show when=move || is_member>
                    <button
                        class="button button--small"
                        disabled=busy.clone()
                        on:click={
                            let id = id.clone();
                            move |_| on_promote.run(id.clone())
                        }
                    >
                        "Promote to admin"
                    </button>
                </Show>
            </td>
        </tr>
    }
}
