//! Auth service: session-related backend operations on top of the gateway.
//!
//! SYSTEM CONTEXT
//! ==============
//! The credential is an HTTP-only cookie set by the backend during the Google
//! OAuth dance. This service never sees it; it only asks the backend "who is
//! this credential" and tells it to forget the credential. Deciding whether a
//! failure is user-visible is left to the callers (reconciler, pages).

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use serde::de::IgnoredAny;

use super::api::{ApiClient, GatewayError};
use super::http::Transport;
use super::timeout::{Elapsed, with_deadline};
use super::types::{Identity, TokenResponse};
use crate::state::session::{RecoveryOutcome, SessionFailure, SessionSink};

pub const PROFILE_PATH: &str = "/auth/me";
pub const GOOGLE_LOGIN_PATH: &str = "/auth/google";
pub const LOGOUT_PATH: &str = "/auth/logout";
pub const REFRESH_PATH: &str = "/auth/refresh";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The backend rejected the credential (HTTP 401).
    #[error("not authenticated")]
    Unauthenticated,
    #[error(transparent)]
    Gateway(GatewayError),
}

impl From<GatewayError> for AuthError {
    fn from(err: GatewayError) -> Self {
        if err.is_unauthorized() { Self::Unauthenticated } else { Self::Gateway(err) }
    }
}

#[derive(Clone, Debug)]
pub struct AuthService<T> {
    api: ApiClient<T>,
}

impl<T: Transport> AuthService<T> {
    pub fn new(api: ApiClient<T>) -> Self {
        Self { api }
    }

    /// Backend endpoint that starts the Google OAuth redirect chain.
    pub fn google_login_url(&self) -> String {
        self.api.url(GOOGLE_LOGIN_PATH)
    }

    /// Ask the backend who the ambient credential belongs to.
    ///
    /// # Errors
    ///
    /// [`AuthError::Unauthenticated`] on 401, [`AuthError::Gateway`] for
    /// everything else.
    pub async fn get_profile(&self) -> Result<Identity, AuthError> {
        Ok(self.api.get::<Identity>(PROFILE_PATH).await?)
    }

    /// Tell the backend to drop the credential, then clear the local session.
    ///
    /// The local session is cleared whether or not the request succeeded:
    /// local state decides whether this client keeps acting logged in. Calling
    /// this while already logged out is fine.
    ///
    /// # Errors
    ///
    /// Returns the gateway error of the logout request, for logging only.
    pub async fn logout<S: SessionSink + ?Sized>(&self, session: &S) -> Result<(), GatewayError> {
        let result = self.api.post_empty::<IgnoredAny>(LOGOUT_PATH).await.map(|_| ());
        session.logout();
        result
    }

    /// Credentialed "who am I" right after the OAuth redirect.
    ///
    /// Any non-2xx answer means "no identity" and yields `Ok(None)`; turning
    /// that into a user-facing failure is the caller's job.
    ///
    /// # Errors
    ///
    /// Network and protocol failures are returned as errors.
    pub async fn resolve_post_oauth_identity(&self) -> Result<Option<Identity>, GatewayError> {
        match self.api.get::<Identity>(PROFILE_PATH).await {
            Ok(identity) => Ok(Some(identity)),
            Err(GatewayError::Status(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Exchange the current credential for a fresh bearer token.
    ///
    /// # Errors
    ///
    /// Propagates the gateway error unchanged.
    pub async fn refresh_token(&self) -> Result<String, GatewayError> {
        let body: TokenResponse = self.api.post_empty(REFRESH_PATH).await?;
        Ok(body.token)
    }

    /// Bounded profile fetch used to recover a session at start-up.
    pub async fn verify_session(&self, deadline: impl Future<Output = ()>) -> RecoveryOutcome {
        match with_deadline(self.get_profile(), deadline).await {
            Ok(Ok(identity)) => RecoveryOutcome::Verified(identity),
            Ok(Err(AuthError::Unauthenticated)) => RecoveryOutcome::Anonymous,
            Ok(Err(AuthError::Gateway(err))) => RecoveryOutcome::Failed(SessionFailure::from(&err)),
            Err(Elapsed) => RecoveryOutcome::Failed(SessionFailure::Timeout),
        }
    }
}
