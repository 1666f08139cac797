use futures::executor::block_on;
use futures::future::{pending, ready};
use serde_json::json;

use super::*;
use crate::net::api::ApiClient;
use crate::net::http::{HttpRequest, HttpResponse, TransportError};
use crate::state::session::SessionStatus;
use crate::testing::{FakeTransport, TEST_API_ROOT, RecordingHost, auth_service, identity, identity_json, json_response};

fn error_params(raw: &str) -> CallbackParams {
    CallbackParams::new(Some(raw.to_owned()), None)
}

fn success_params() -> CallbackParams {
    CallbackParams::new(None, Some("true".to_owned()))
}

// =============================================================
// Transition function
// =============================================================

#[test]
fn error_parameter_is_terminal_without_command() {
    let (state, command) = CallbackState::Initial.transition(CallbackEvent::Inspect(error_params("Access%20denied")));
    assert_eq!(state, CallbackState::ErrorFromProvider("Access denied".into()));
    assert_eq!(command, None);
    assert!(state.is_terminal());
}

#[test]
fn error_parameter_wins_over_success() {
    let params = CallbackParams::new(Some("denied".into()), Some("true".into()));
    let (state, command) = CallbackState::Initial.transition(CallbackEvent::Inspect(params));
    assert_eq!(state.error_message(), Some("denied"));
    assert_eq!(command, None);
}

#[test]
fn success_true_requests_profile() {
    let (state, command) = CallbackState::Initial.transition(CallbackEvent::Inspect(success_params()));
    assert_eq!(state, CallbackState::AwaitingProfile);
    assert_eq!(command, Some(CallbackCommand::ResolveProfile));
}

#[test]
fn success_other_than_true_is_no_signal() {
    let params = CallbackParams::new(None, Some("1".into()));
    let (state, command) = CallbackState::Initial.transition(CallbackEvent::Inspect(params));
    assert_eq!(state, CallbackState::NoSignal);
    assert_eq!(command, None);
    assert!(!state.is_terminal());
}

#[test]
fn no_parameters_is_no_signal() {
    let (state, _) = CallbackState::Initial.transition(CallbackEvent::Inspect(CallbackParams::default()));
    assert_eq!(state, CallbackState::NoSignal);
}

#[test]
fn resolved_identity_completes() {
    let (state, command) =
        CallbackState::AwaitingProfile.transition(CallbackEvent::ProfileResolved(Ok(Some(identity("u1", "user")))));
    assert_eq!(state, CallbackState::Authenticated);
    assert_eq!(command, Some(CallbackCommand::Complete(identity("u1", "user"))));
}

#[test]
fn absent_identity_fails_with_retry_message() {
    let (state, command) = CallbackState::AwaitingProfile.transition(CallbackEvent::ProfileResolved(Ok(None)));
    assert_eq!(state.error_message(), Some(AUTH_FAILED_MESSAGE));
    assert_eq!(command, None);
}

#[test]
fn failed_call_fails_with_generic_message() {
    let (state, _) = CallbackState::AwaitingProfile
        .transition(CallbackEvent::ProfileResolved(Err(GatewayError::Network("offline".into()))));
    assert_eq!(state.error_message(), Some(AUTH_ERROR_MESSAGE));
}

#[test]
fn terminal_states_ignore_further_events() {
    let failed = CallbackState::ErrorFromProvider("x".into());
    let (state, command) = failed.clone().transition(CallbackEvent::ProfileResolved(Ok(Some(identity("u1", "user")))));
    assert_eq!(state, failed);
    assert_eq!(command, None);

    let (state, command) = CallbackState::Authenticated.transition(CallbackEvent::Inspect(success_params()));
    assert_eq!(state, CallbackState::Authenticated);
    assert_eq!(command, None);
}

#[test]
fn provider_message_decoding() {
    assert_eq!(decode_provider_message("Access%20denied"), "Access denied");
    assert_eq!(decode_provider_message("plain"), "plain");
    assert_eq!(decode_provider_message("%FF%FE"), "%FF%FE");
}

// =============================================================
// Driver
// =============================================================

#[test]
fn provider_error_makes_no_network_call() {
    let transport = FakeTransport::new();
    let host = RecordingHost::new();

    let state = block_on(reconcile(error_params("Access%20denied"), &auth_service(&transport), &host, pending()));

    assert_eq!(state, CallbackState::ErrorFromProvider("Access denied".into()));
    assert_eq!(transport.request_count(), 0);
    assert!(host.navigations.borrow().is_empty());
    assert_eq!(host.session.logins.get(), 0);
    assert_eq!(host.shown.borrow().last(), Some(&state));
}

#[test]
fn success_with_identity_logs_in_and_navigates_once() {
    let transport = FakeTransport::new();
    transport.push(json_response(
        200,
        &json!({ "id": "u1", "email": "a@b.com", "name": "A", "role": "user" }),
    ));
    let host = RecordingHost::new();

    let state = block_on(reconcile(success_params(), &auth_service(&transport), &host, pending()));

    assert_eq!(state, CallbackState::Authenticated);
    let session = host.session.snapshot();
    assert_eq!(session.status(), &SessionStatus::Authenticated);
    assert_eq!(session.identity().map(Identity::email), Some("a@b.com"));
    assert_eq!(host.session.logins.get(), 1);
    assert_eq!(*host.navigations.borrow(), vec![routes::DASHBOARD.to_owned()]);
    assert_eq!(transport.request_count(), 1);
}

#[test]
fn success_with_401_shows_failure_and_stays_logged_out() {
    let transport = FakeTransport::new();
    transport.push(json_response(401, &json!({ "error": "Unauthorized", "code": 401 })));
    let host = RecordingHost::new();

    let state = block_on(reconcile(success_params(), &auth_service(&transport), &host, pending()));

    assert_eq!(state.error_message(), Some("Failed to authenticate. Please try again."));
    assert!(!host.session.snapshot().is_authenticated());
    assert!(host.navigations.borrow().is_empty());
    assert_eq!(
        *host.shown.borrow(),
        vec![CallbackState::AwaitingProfile, CallbackState::ErrorFromProvider(AUTH_FAILED_MESSAGE.into())]
    );
}

#[test]
fn success_with_network_error_shows_generic_failure() {
    let transport = FakeTransport::new();
    transport.push_network_error("offline");
    let host = RecordingHost::new();

    let state = block_on(reconcile(success_params(), &auth_service(&transport), &host, pending()));

    assert_eq!(state.error_message(), Some(AUTH_ERROR_MESSAGE));
    assert!(!host.session.snapshot().is_authenticated());
}

#[test]
fn no_signal_idles_without_calls() {
    let transport = FakeTransport::new();
    let host = RecordingHost::new();

    let state = block_on(reconcile(CallbackParams::default(), &auth_service(&transport), &host, pending()));

    assert_eq!(state, CallbackState::NoSignal);
    assert_eq!(transport.request_count(), 0);
    assert!(host.navigations.borrow().is_empty());
}

#[test]
fn result_after_unmount_is_discarded() {
    let transport = FakeTransport::new();
    transport.push(json_response(200, &identity_json("u1", "admin")));
    let host = RecordingHost::new();
    let mount = host.mount.clone();
    transport.on_send(move || mount.release());

    let state = block_on(reconcile(success_params(), &auth_service(&transport), &host, pending()));

    assert_eq!(state, CallbackState::AwaitingProfile);
    assert_eq!(host.session.snapshot(), crate::state::session::Session::default());
    assert_eq!(host.session.logins.get(), 0);
    assert!(host.navigations.borrow().is_empty());
}

#[test]
fn profile_timeout_is_terminal_with_generic_message() {
    let (state, command) = CallbackState::AwaitingProfile.transition(CallbackEvent::ProfileTimedOut);
    assert_eq!(state.error_message(), Some(AUTH_ERROR_MESSAGE));
    assert_eq!(command, None);
}

#[derive(Clone, Copy)]
struct SilentBackend;

impl Transport for SilentBackend {
    fn send(&self, _request: HttpRequest) -> impl Future<Output = Result<HttpResponse, TransportError>> {
        pending()
    }
}

#[test]
fn unanswered_profile_call_ends_in_failure_card() {
    let auth = AuthService::new(ApiClient::new(SilentBackend, TEST_API_ROOT));
    let host = RecordingHost::new();

    let state = block_on(reconcile(success_params(), &auth, &host, ready(())));

    assert_eq!(state, CallbackState::ErrorFromProvider(AUTH_ERROR_MESSAGE.into()));
    assert!(state.is_terminal());
    assert_eq!(
        *host.shown.borrow(),
        vec![CallbackState::AwaitingProfile, CallbackState::ErrorFromProvider(AUTH_ERROR_MESSAGE.into())]
    );
    assert!(!host.session.snapshot().is_authenticated());
    assert!(host.navigations.borrow().is_empty());
}

#[test]
fn unused_deadline_does_not_affect_provider_error() {
    let transport = FakeTransport::new();
    let host = RecordingHost::new();

    let state = block_on(reconcile(error_params("denied"), &auth_service(&transport), &host, ready(())));

    assert_eq!(state, CallbackState::ErrorFromProvider("denied".into()));
    assert_eq!(transport.request_count(), 0);
}
