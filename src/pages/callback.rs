//! OAuth callback page.
//!
//! SYSTEM CONTEXT
//! ==============
//! The backend redirects here after Google sign-in with either `?error=...` or
//! `?success=true`. The page reads those parameters once at mount and hands
//! them to the reconciler in `state::callback`; it only renders the state the
//! reconciler reports.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::app::AppAuth;
use crate::components::loading::Loading;
use crate::config::ClientConfig;
use crate::net::types::Identity;
use crate::routes;
use crate::state::callback::{CallbackHost, CallbackParams, CallbackState, reconcile};
use crate::state::session::{SessionSink, SessionStore};
use crate::util::mount::MountGuard;

/// Binds the reconciler to this page instance.
struct PageHost<N> {
    session: SessionStore,
    navigate: N,
    mount: MountGuard,
    state: RwSignal<CallbackState>,
}

impl<N> SessionSink for PageHost<N> {
    fn login(&self, identity: Identity) {
        if self.mount.is_mounted() {
            self.session.login(identity);
        }
    }

    fn logout(&self) {
        self.session.logout();
    }
}

impl<N> CallbackHost for PageHost<N>
where
    N: Fn(&str, NavigateOptions),
{
    fn is_active(&self) -> bool {
        self.mount.is_mounted()
    }

    fn navigate(&self, path: &str) {
        (self.navigate)(path, NavigateOptions { replace: true, ..NavigateOptions::default() });
    }

    fn show(&self, state: &CallbackState) {
        self.state.try_set(state.clone());
    }
}

#[component]
pub fn AuthCallbackPage() -> impl IntoView {
    let session = expect_context::<SessionStore>();
    let auth = expect_context::<AppAuth>();
    let timeout = expect_context::<ClientConfig>().profile_timeout;
    let query = use_query_map();

    // Read once; re-renders must not restart the flow.
    let params = query.with_untracked(|q| CallbackParams::new(q.get("error"), q.get("success")));

    let state = RwSignal::new(CallbackState::Initial);
    let host = PageHost { session, navigate: use_navigate(), mount: MountGuard::install(), state };

    crate::util::task::spawn(async move {
        reconcile(params, &auth, &host, crate::net::timeout::sleep(timeout)).await;
    });

    let error = move || state.with(|s| s.error_message().map(str::to_owned));

    view! {
        <div class="callback-page">
            <Show
                when=move || error().is_none()
                fallback=move || {
                    view! {
                        <div class="callback-card callback-card--error">
                            <h2>"Authentication Error"</h2>
                            <p class="callback-card__message">{move || error().unwrap_or_default()}</p>
                            <a href=routes::LOGIN class="login-button">"Back to Login"</a>
                        </div>
                    }
                }
            >
                <Loading label="Completing authentication..."/>
            </Show>
        </div>
    }
}
