//! Dashboard page: the authenticated landing route.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::app::AppAuth;
use crate::components::role_badge::RoleBadge;
use crate::components::route_guard::RouteGuard;
use crate::net::types::Role;
use crate::routes;
use crate::state::session::SessionStore;
use crate::util::guard::Access;

#[component]
pub fn DashboardPage() -> impl IntoView {
    view! {
        <RouteGuard access=Access::SignedIn>
            <DashboardContent/>
        </RouteGuard>
    }
}

#[component]
fn DashboardContent() -> impl IntoView {
    let session = expect_context::<SessionStore>();
    let auth = expect_context::<AppAuth>();
    let navigate = use_navigate();
    let signing_out = RwSignal::new(false);

    let name = move || session.identity().map(|i| i.display_name().to_owned()).unwrap_or_default();
    let email = move || session.identity().map(|i| i.email().to_owned()).unwrap_or_default();
    let role = move || session.identity().map_or(Role::Member, |i| i.role());

    let on_logout = move |_| {
        if signing_out.get_untracked() {
            return;
        }
        signing_out.set(true);
        let auth = auth.clone();
        let navigate = navigate.clone();
        crate::util::task::spawn(async move {
            if let Err(err) = auth.logout(&session).await {
                leptos::logging::warn!("logout request failed: {err}");
            }
            navigate(routes::HOME, NavigateOptions::default());
        });
    };

    view! {
        <div class="dashboard-page">
            <header class="dashboard-header">
                <h1>"Candidate Organizer"</h1>
                <div class="dashboard-header__user">
                    <span class="dashboard-header__name">{name}</span>
                    <span class="dashboard-header__email">{email}</span>
                    {move || view! { <RoleBadge role=role()/> }}
                    <button class="button button--secondary" on:click=on_logout disabled=move || signing_out.get()>
                        "Logout"
                    </button>
                </div>
            </header>
            <main class="dashboard-main">
                <h2>{move || format!("Welcome back, {}!", name())}</h2>
                <Show when=move || session.is_admin()>
                    <a href=routes::USERS class="button">"Manage users"</a>
                </Show>
            </main>
        </div>
    }
}
