//! What a page does with a failed API call.
//!
//! 401 on any call means the session is gone: clear it and go to login. 403
//! means the user is signed in but lacks the role: send them to the dashboard.
//! Everything else is shown inline by the page that made the call.

#[cfg(test)]
#[path = "errors_test.rs"]
mod errors_test;

use crate::net::api::GatewayError;
use crate::routes;
use crate::state::session::SessionSink;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorDisposition {
    Reauthenticate,
    Forbidden,
    /// Message for the page to display.
    Report(String),
}

pub fn disposition(err: &GatewayError) -> ErrorDisposition {
    if err.is_unauthorized() {
        ErrorDisposition::Reauthenticate
    } else if err.is_forbidden() {
        ErrorDisposition::Forbidden
    } else {
        ErrorDisposition::Report(err.to_string())
    }
}

/// Act on `err` and return the message the page should render, if any.
pub fn apply_disposition<S, N>(err: &GatewayError, session: &S, navigate: N) -> Option<String>
where
    S: SessionSink + ?Sized,
    N: FnOnce(&'static str),
{
    match disposition(err) {
        ErrorDisposition::Reauthenticate => {
            leptos::logging::warn!("session rejected by backend, signing out");
            session.logout();
            navigate(routes::LOGIN);
            None
        }
        ErrorDisposition::Forbidden => {
            navigate(routes::DASHBOARD);
            None
        }
        ErrorDisposition::Report(message) => Some(message),
    }
}
