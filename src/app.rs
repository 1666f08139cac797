//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::config::ClientConfig;
use crate::net::api::ApiClient;
use crate::net::auth::AuthService;
use crate::net::http::BrowserTransport;
use crate::net::users::UsersService;
use crate::pages::{
    callback::AuthCallbackPage, dashboard::DashboardPage, home::HomePage, login::LoginPage, users::UsersPage,
};
use crate::state::session::SessionStore;

/// Auth service as provided through context.
pub type AppAuth = AuthService<BrowserTransport>;
/// Admin user service as provided through context.
pub type AppUsers = UsersService<BrowserTransport>;

/// Root application component.
///
/// Creates the single session store, starts silent session recovery, provides
/// the services to every page and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ClientConfig::from_build_env();
    let api = ApiClient::new(BrowserTransport, config.api_root());
    let auth: AppAuth = AuthService::new(api.clone());
    let users: AppUsers = UsersService::new(api);

    let session = SessionStore::new();
    session.recover(auth.clone(), config.profile_timeout);

    provide_context(session);
    provide_context(auth);
    provide_context(users);
    provide_context(config);

    view! {
        <Title text="Candidate Organizer"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=(StaticSegment("auth"), StaticSegment("callback")) view=AuthCallbackPage/>
                <Route path=StaticSegment("dashboard") view=DashboardPage/>
                <Route path=StaticSegment("users") view=UsersPage/>
            </Routes>
        </Router>
    }
}
