//! Process-wide authentication session.
//!
//! SYSTEM CONTEXT
//! ==============
//! One [`SessionStore`] is created by the root component and provided through
//! Leptos context. Route guards read it; the auth service and the OAuth
//! callback reconciler write it, and only through [`SessionSink`].
//!
//! DESIGN
//! ======
//! The transitions live on the plain [`Session`] value so they are testable
//! without a reactive runtime; the store is a thin signal wrapper around it.
//!
//! Invariant: `status == Authenticated` iff `identity` is present, and the
//! identity came from a profile fetch in this process. Nothing here reads
//! client-side storage, so a reload always starts from `Authenticating` and
//! has to ask the server again.
//!
//! Every `login`/`logout` bumps `epoch`. Start-up recovery captures the epoch
//! when it begins and its result is dropped if the epoch moved, so a slow
//! recovery can never overwrite a newer login or logout.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::time::Duration;

use leptos::prelude::*;

use crate::net::api::GatewayError;
use crate::net::auth::AuthService;
use crate::net::http::Transport;
use crate::net::types::Identity;

/// Why the last verification attempt could not decide either way.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionFailure {
    #[error("profile verification timed out")]
    Timeout,
    #[error("network failure: {0}")]
    Network(String),
    #[error("unexpected response: {0}")]
    Protocol(String),
    #[error("server responded with status {0}")]
    Server(u16),
}

impl From<&GatewayError> for SessionFailure {
    fn from(err: &GatewayError) -> Self {
        match err {
            GatewayError::Network(message) => Self::Network(message.clone()),
            GatewayError::Status(status) => Self::Server(status.status),
            GatewayError::Protocol(protocol) => Self::Protocol(protocol.to_string()),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SessionStatus {
    #[default]
    Unauthenticated,
    /// A profile verification is outstanding; guards must not act yet.
    Authenticating,
    Authenticated,
    Failed(SessionFailure),
}

impl SessionStatus {
    /// Whether guards may act on this status.
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Authenticating)
    }
}

/// Result of the silent start-up profile check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecoveryOutcome {
    /// The ambient credential is valid; this is who it belongs to.
    Verified(Identity),
    /// The backend said 401: no usable credential.
    Anonymous,
    Failed(SessionFailure),
}

/// The client's current belief about who is logged in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    status: SessionStatus,
    identity: Option<Identity>,
    epoch: u64,
}

impl Session {
    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.status == SessionStatus::Authenticated
    }

    pub fn is_admin(&self) -> bool {
        self.is_authenticated() && self.identity.as_ref().is_some_and(Identity::is_admin)
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Record a server-verified identity.
    pub fn login(&mut self, identity: Identity) {
        self.status = SessionStatus::Authenticated;
        self.identity = Some(identity);
        self.epoch += 1;
    }

    /// Forget the identity. Safe to call in any state.
    pub fn logout(&mut self) {
        self.status = SessionStatus::Unauthenticated;
        self.identity = None;
        self.epoch += 1;
    }

    /// Enter `Authenticating` for a background check and return the epoch the
    /// result must be settled against. An already authenticated session is
    /// left as is.
    pub fn begin_recovery(&mut self) -> u64 {
        if !self.is_authenticated() {
            self.status = SessionStatus::Authenticating;
            self.identity = None;
        }
        self.epoch
    }

    /// Apply a recovery result captured at `epoch`. Returns `false` and leaves
    /// the session untouched when a login or logout happened in between.
    pub fn settle_recovery(&mut self, epoch: u64, outcome: RecoveryOutcome) -> bool {
        if epoch != self.epoch {
            return false;
        }
        match outcome {
            RecoveryOutcome::Verified(identity) => self.login(identity),
            RecoveryOutcome::Anonymous => self.logout(),
            RecoveryOutcome::Failed(reason) => {
                self.status = SessionStatus::Failed(reason);
                self.identity = None;
            }
        }
        true
    }
}

/// The two mutation entry points of the session.
///
/// Implemented by [`SessionStore`] in the app and by in-memory fakes in tests.
pub trait SessionSink {
    /// Only call with an identity obtained from a verified profile fetch.
    fn login(&self, identity: Identity);
    fn logout(&self);
}

/// Reactive, context-provided handle to the single [`Session`].
#[derive(Clone, Copy, Debug)]
pub struct SessionStore {
    session: RwSignal<Session>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self { session: RwSignal::new(Session::default()) }
    }

    /// Read the session, tracking it in the current reactive scope.
    pub fn with<U>(&self, f: impl FnOnce(&Session) -> U) -> U {
        self.session.with(f)
    }

    pub fn status(&self) -> SessionStatus {
        self.with(|s| s.status().clone())
    }

    pub fn identity(&self) -> Option<Identity> {
        self.with(|s| s.identity().cloned())
    }

    pub fn is_authenticated(&self) -> bool {
        self.with(Session::is_authenticated)
    }

    pub fn is_admin(&self) -> bool {
        self.with(Session::is_admin)
    }

    /// Untracked copy for use inside async tasks.
    pub fn snapshot(&self) -> Session {
        self.session.get_untracked()
    }

    /// Kick off the one-time silent verification that recovers a session
    /// across page reloads from whatever cookie the browser holds.
    pub fn recover<T>(self, auth: AuthService<T>, timeout: Duration)
    where
        T: Transport + 'static,
    {
        let Some(epoch) = self.session.try_update(Session::begin_recovery) else {
            return;
        };

        crate::util::task::spawn(async move {
            let outcome = auth.verify_session(crate::net::timeout::sleep(timeout)).await;
            match &outcome {
                RecoveryOutcome::Verified(identity) => {
                    leptos::logging::log!("session recovered for user {}", identity.id());
                }
                RecoveryOutcome::Anonymous => leptos::logging::log!("no active session"),
                RecoveryOutcome::Failed(reason) => leptos::logging::warn!("session recovery failed: {reason}"),
            }
            if self.session.try_update(|s| s.settle_recovery(epoch, outcome)) != Some(true) {
                leptos::logging::log!("discarding stale session recovery result");
            }
        });
    }
}

impl SessionSink for SessionStore {
    fn login(&self, identity: Identity) {
        self.session.try_update(|s| s.login(identity));
    }

    fn logout(&self) {
        self.session.try_update(Session::logout);
    }
}
