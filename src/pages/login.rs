//! Login page: starts the Google OAuth redirect chain on the backend.
//!
//! Visitors who already hold a verified session are sent straight to the
//! dashboard.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::app::AppAuth;
use crate::state::session::{SessionFailure, SessionStatus, SessionStore};
use crate::util::guard::install_guest_redirect;

/// Notice shown when start-up verification could not reach a verdict.
fn failure_notice(status: &SessionStatus) -> Option<String> {
    match status {
        SessionStatus::Failed(SessionFailure::Timeout) => {
            Some("The server took too long to confirm your session. Please sign in again.".to_owned())
        }
        SessionStatus::Failed(reason) => Some(format!("We could not confirm your session ({reason}). Please sign in again.")),
        _ => None,
    }
}

fn start_google_login(url: &str) {
    #[cfg(feature = "csr")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(url);
        }
    }
    #[cfg(not(feature = "csr"))]
    let _ = url;
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<SessionStore>();
    let auth = expect_context::<AppAuth>();
    install_guest_redirect(session, use_navigate());

    let login_url = auth.google_login_url();
    let redirect_url = login_url.clone();
    let notice = move || session.with(|s| failure_notice(s.status()));

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Candidate Organizer"</h1>
                <p class="login-card__subtitle">"Sign in with your work Google account"</p>
                <Show when=move || notice().is_some()>
                    <p class="login-message">{move || notice().unwrap_or_default()}</p>
                </Show>
                <a
                    href=login_url
                    class="login-button"
                    on:click=move |ev| {
                        ev.prevent_default();
                        start_google_login(&redirect_url);
                    }
                >
                    "Sign in with Google"
                </a>
            </div>
        </div>
    }
}
