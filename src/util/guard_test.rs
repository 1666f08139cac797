use super::*;
use crate::state::session::{RecoveryOutcome, SessionFailure};
use crate::testing::identity;

fn authenticating() -> Session {
    let mut session = Session::default();
    session.begin_recovery();
    session
}

fn signed_in(role: &str) -> Session {
    let mut session = Session::default();
    session.login(identity("u1", role));
    session
}

fn failed() -> Session {
    let mut session = Session::default();
    let epoch = session.begin_recovery();
    session.settle_recovery(epoch, RecoveryOutcome::Failed(SessionFailure::Timeout));
    session
}

#[test]
fn authenticating_never_redirects() {
    for access in [Access::SignedIn, Access::AdminOnly] {
        assert_eq!(guard_decision(&authenticating(), access), GuardDecision::Pending);
    }
}

#[test]
fn unauthenticated_always_redirects_to_login() {
    for access in [Access::SignedIn, Access::AdminOnly] {
        assert_eq!(guard_decision(&Session::default(), access), GuardDecision::Redirect(routes::LOGIN));
    }
}

#[test]
fn failed_session_redirects_to_login() {
    assert_eq!(guard_decision(&failed(), Access::SignedIn), GuardDecision::Redirect(routes::LOGIN));
}

#[test]
fn member_is_allowed_on_signed_in_pages() {
    assert_eq!(guard_decision(&signed_in("user"), Access::SignedIn), GuardDecision::Allow);
}

#[test]
fn member_is_sent_to_dashboard_from_admin_pages() {
    assert_eq!(guard_decision(&signed_in("user"), Access::AdminOnly), GuardDecision::Redirect(routes::DASHBOARD));
}

#[test]
fn admin_is_allowed_everywhere() {
    assert_eq!(guard_decision(&signed_in("admin"), Access::SignedIn), GuardDecision::Allow);
    assert_eq!(guard_decision(&signed_in("admin"), Access::AdminOnly), GuardDecision::Allow);
}

#[test]
fn decision_follows_session_changes() {
    let mut session = authenticating();
    assert_eq!(guard_decision(&session, Access::AdminOnly), GuardDecision::Pending);

    session.login(identity("u1", "admin"));
    assert_eq!(guard_decision(&session, Access::AdminOnly), GuardDecision::Allow);

    session.logout();
    assert_eq!(guard_decision(&session, Access::AdminOnly), GuardDecision::Redirect(routes::LOGIN));
}

#[test]
fn guest_page_sends_signed_in_users_to_dashboard() {
    assert_eq!(guest_decision(&signed_in("user")), GuardDecision::Redirect(routes::DASHBOARD));
    assert_eq!(guest_decision(&Session::default()), GuardDecision::Allow);
    assert_eq!(guest_decision(&authenticating()), GuardDecision::Allow);
}
