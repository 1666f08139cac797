//! Route guard decisions and the redirect effects built on them.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every protected page applies the same rules: do nothing while the session
//! is still being verified, send anonymous (or failed) sessions to `/login`,
//! and send authenticated non-admins away from admin-only pages. The effects
//! re-run whenever the session signal changes, not only on first mount.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::net::types::Role;
use crate::routes;
use crate::state::session::{Session, SessionStatus, SessionStore};

/// Who may see a page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// Any authenticated user.
    SignedIn,
    AdminOnly,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session not settled yet: show a neutral loading state, take no action.
    Pending,
    Allow,
    Redirect(&'static str),
}

/// Decide what a protected page should do for the given session.
pub fn guard_decision(session: &Session, access: Access) -> GuardDecision {
    match session.status() {
        SessionStatus::Authenticating => GuardDecision::Pending,
        SessionStatus::Unauthenticated | SessionStatus::Failed(_) => GuardDecision::Redirect(routes::LOGIN),
        SessionStatus::Authenticated => {
            let role = session.identity().map(|identity| identity.role());
            match (access, role) {
                (Access::SignedIn, Some(_)) | (Access::AdminOnly, Some(Role::Admin)) => GuardDecision::Allow,
                (Access::AdminOnly, Some(Role::Member)) => GuardDecision::Redirect(routes::DASHBOARD),
                (_, None) => GuardDecision::Redirect(routes::LOGIN),
            }
        }
    }
}

/// Inverse guard for the login page: already signed-in visitors go to the
/// landing page; everyone else stays.
pub fn guest_decision(session: &Session) -> GuardDecision {
    if session.is_authenticated() {
        GuardDecision::Redirect(routes::DASHBOARD)
    } else {
        GuardDecision::Allow
    }
}

fn replace_options() -> NavigateOptions {
    NavigateOptions { replace: true, ..NavigateOptions::default() }
}

/// Redirect whenever [`guard_decision`] says so for the current session.
pub fn install_route_guard<F>(session: SessionStore, access: Access, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let GuardDecision::Redirect(target) = session.with(|s| guard_decision(s, access)) {
            navigate(target, replace_options());
        }
    });
}

/// Redirect signed-in visitors away from guest-only pages.
pub fn install_guest_redirect<F>(session: SessionStore, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let GuardDecision::Redirect(target) = session.with(guest_decision) {
            navigate(target, replace_options());
        }
    });
}
