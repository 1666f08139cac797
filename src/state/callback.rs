//! OAuth callback reconciler.
//!
//! SYSTEM CONTEXT
//! ==============
//! The backend finishes the Google OAuth exchange, sets the session cookie and
//! redirects the browser to `/auth/callback?success=true` (or `?error=...`).
//! This module turns that redirect into a terminal session state exactly once
//! per page visit.
//!
//! DESIGN
//! ======
//! [`CallbackState::transition`] is the single transition function; it is
//! pure and returns the side effect to perform as a [`CallbackCommand`].
//! [`reconcile`] drives it against a [`CallbackHost`] (the page in the app, a
//! recording fake in tests).
//!
//! ```text
//! Initial --error=..------> ErrorFromProvider (terminal)
//!         --success=true--> AwaitingProfile --identity--> Authenticated (terminal)
//!                                           --absent/err/timeout-> ErrorFromProvider (terminal)
//!         --otherwise-----> NoSignal (idle spinner)
//! ```

#[cfg(test)]
#[path = "callback_test.rs"]
mod callback_test;

use std::pin::pin;

use crate::net::api::GatewayError;
use crate::net::auth::AuthService;
use crate::net::http::Transport;
use crate::net::timeout::with_deadline;
use crate::net::types::Identity;
use crate::routes;
use crate::state::session::SessionSink;

pub const AUTH_FAILED_MESSAGE: &str = "Failed to authenticate. Please try again.";
pub const AUTH_ERROR_MESSAGE: &str = "An error occurred during authentication.";

/// Query parameters the identity provider round-trip leaves on the URL.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CallbackParams {
    pub error: Option<String>,
    pub success: Option<String>,
}

impl CallbackParams {
    pub fn new(error: Option<String>, success: Option<String>) -> Self {
        Self { error, success }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CallbackState {
    #[default]
    Initial,
    AwaitingProfile,
    /// Reached the page without redirect parameters; keep waiting.
    NoSignal,
    /// Terminal failure; the message is shown next to a way back to login.
    ErrorFromProvider(String),
    /// Terminal success; the session holds the identity and navigation fired.
    Authenticated,
}

impl CallbackState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::ErrorFromProvider(_) | Self::Authenticated)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::ErrorFromProvider(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum CallbackEvent {
    Inspect(CallbackParams),
    ProfileResolved(Result<Option<Identity>, GatewayError>),
    /// The profile call did not finish before the deadline.
    ProfileTimedOut,
}

/// Side effect requested by a transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallbackCommand {
    /// Call `resolve_post_oauth_identity` and feed the result back in.
    ResolveProfile,
    /// Write the identity into the session and go to the landing page.
    Complete(Identity),
}

impl CallbackState {
    /// Advance the machine. Events that do not apply to the current state are
    /// ignored, which makes terminal states absorbing.
    pub fn transition(self, event: CallbackEvent) -> (Self, Option<CallbackCommand>) {
        match (self, event) {
            (Self::Initial, CallbackEvent::Inspect(params)) => inspect(params),
            (Self::AwaitingProfile, CallbackEvent::ProfileResolved(Ok(Some(identity)))) => {
                (Self::Authenticated, Some(CallbackCommand::Complete(identity)))
            }
            (Self::AwaitingProfile, CallbackEvent::ProfileResolved(Ok(None))) => {
                (Self::ErrorFromProvider(AUTH_FAILED_MESSAGE.to_owned()), None)
            }
            (Self::AwaitingProfile, CallbackEvent::ProfileResolved(Err(_)) | CallbackEvent::ProfileTimedOut) => {
                (Self::ErrorFromProvider(AUTH_ERROR_MESSAGE.to_owned()), None)
            }
            (state, _) => (state, None),
        }
    }
}

fn inspect(params: CallbackParams) -> (CallbackState, Option<CallbackCommand>) {
    if let Some(raw) = params.error {
        return (CallbackState::ErrorFromProvider(decode_provider_message(&raw)), None);
    }
    if params.success.as_deref() == Some("true") {
        return (CallbackState::AwaitingProfile, Some(CallbackCommand::ResolveProfile));
    }
    (CallbackState::NoSignal, None)
}

/// URL-decode the provider's message; text that does not decode is shown raw.
pub fn decode_provider_message(raw: &str) -> String {
    urlencoding::decode(raw).map_or_else(|_| raw.to_owned(), |decoded| decoded.into_owned())
}

/// The page the reconciler runs on.
pub trait CallbackHost: SessionSink {
    /// `false` once the page has unmounted; late results are then dropped.
    fn is_active(&self) -> bool;
    fn navigate(&self, path: &str);
    /// Present a new state (spinner, error card).
    fn show(&self, state: &CallbackState);
}

/// Run the callback machine to rest and return the final state.
///
/// The profile request is the only await point and is raced against
/// `deadline`; losing the race ends in the generic failure message. If the
/// host is no longer active when the request settles, the result is discarded
/// without touching the session or navigating.
pub async fn reconcile<T, H, D>(params: CallbackParams, auth: &AuthService<T>, host: &H, deadline: D) -> CallbackState
where
    T: Transport,
    H: CallbackHost + ?Sized,
    D: Future<Output = ()>,
{
    let mut deadline = pin!(deadline);
    let (mut state, mut command) = CallbackState::Initial.transition(CallbackEvent::Inspect(params));
    host.show(&state);

    while let Some(next) = command.take() {
        match next {
            CallbackCommand::ResolveProfile => {
                let outcome = with_deadline(auth.resolve_post_oauth_identity(), deadline.as_mut()).await;
                if !host.is_active() {
                    leptos::logging::log!("auth callback left before profile resolved; discarding result");
                    return state;
                }
                let event = match outcome {
                    Ok(result) => {
                        if let Err(err) = &result {
                            leptos::logging::error!("authentication error: {err}");
                        }
                        CallbackEvent::ProfileResolved(result)
                    }
                    Err(elapsed) => {
                        leptos::logging::error!("authentication error: profile lookup {elapsed}");
                        CallbackEvent::ProfileTimedOut
                    }
                };
                (state, command) = state.transition(event);
                host.show(&state);
            }
            CallbackCommand::Complete(identity) => {
                host.login(identity);
                host.navigate(routes::DASHBOARD);
            }
        }
    }

    state
}
