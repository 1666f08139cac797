//! Test doubles shared by unit tests across modules.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use serde_json::{Value, json};

use crate::net::api::ApiClient;
use crate::net::auth::AuthService;
use crate::net::http::{HttpRequest, HttpResponse, JSON_CONTENT_TYPE, Transport, TransportError};
use crate::net::types::Identity;
use crate::state::callback::{CallbackHost, CallbackState};
use crate::state::session::{Session, SessionSink};
use crate::util::mount::MountGuard;

pub const TEST_API_ROOT: &str = "http://api.test/api/v1";

#[derive(Default)]
struct FakeInner {
    responses: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: RefCell<Vec<HttpRequest>>,
    on_send: RefCell<Option<Box<dyn Fn()>>>,
}

/// Transport that replays queued responses and records every request.
#[derive(Clone, Default)]
pub struct FakeTransport {
    inner: Rc<FakeInner>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, response: HttpResponse) -> &Self {
        self.inner.responses.borrow_mut().push_back(Ok(response));
        self
    }

    pub fn push_network_error(&self, message: &str) -> &Self {
        self.inner.responses.borrow_mut().push_back(Err(TransportError(message.to_owned())));
        self
    }

    /// Run `hook` each time a request is sent, before its response is returned.
    pub fn on_send(&self, hook: impl Fn() + 'static) {
        *self.inner.on_send.borrow_mut() = Some(Box::new(hook));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.inner.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.inner.requests.borrow().len()
    }
}

impl Transport for FakeTransport {
    fn send(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse, TransportError>> {
        self.inner.requests.borrow_mut().push(request);
        if let Some(hook) = self.inner.on_send.borrow().as_ref() {
            hook();
        }
        let next = self
            .inner
            .responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError("no response queued".to_owned())));
        std::future::ready(next)
    }
}

pub fn json_response(status: u16, body: &Value) -> HttpResponse {
    HttpResponse {
        status,
        status_text: status_text(status).to_owned(),
        content_type: Some(format!("{JSON_CONTENT_TYPE}; charset=utf-8")),
        body: body.to_string(),
    }
}

pub fn text_response(status: u16, content_type: &str, body: &str) -> HttpResponse {
    HttpResponse {
        status,
        status_text: status_text(status).to_owned(),
        content_type: Some(content_type.to_owned()),
        body: body.to_owned(),
    }
}

pub fn no_content() -> HttpResponse {
    HttpResponse { status: 204, status_text: "No Content".to_owned(), content_type: None, body: String::new() }
}

fn status_text(status: u16) -> &'static str {
    match status {
        200 => "OK",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        _ => "",
    }
}

pub fn identity_json(id: &str, role: &str) -> Value {
    json!({
        "id": id,
        "email": format!("{id}@b.com"),
        "name": id.to_uppercase(),
        "role": role,
        "workspace_domain": "b.com",
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z"
    })
}

pub fn identity(id: &str, role: &str) -> Identity {
    serde_json::from_value(identity_json(id, role)).expect("fixture identity decodes")
}

pub fn auth_service(transport: &FakeTransport) -> AuthService<FakeTransport> {
    AuthService::new(ApiClient::new(transport.clone(), TEST_API_ROOT))
}

/// In-memory session sink that counts entry-point calls.
#[derive(Default)]
pub struct RecordingSession {
    pub session: RefCell<Session>,
    pub logins: Cell<usize>,
    pub logouts: Cell<usize>,
}

impl RecordingSession {
    pub fn snapshot(&self) -> Session {
        self.session.borrow().clone()
    }
}

impl SessionSink for RecordingSession {
    fn login(&self, identity: Identity) {
        self.logins.set(self.logins.get() + 1);
        self.session.borrow_mut().login(identity);
    }

    fn logout(&self) {
        self.logouts.set(self.logouts.get() + 1);
        self.session.borrow_mut().logout();
    }
}

/// Callback page stand-in: records navigations and every rendered state.
pub struct RecordingHost {
    pub session: RecordingSession,
    pub mount: MountGuard,
    pub navigations: RefCell<Vec<String>>,
    pub shown: RefCell<Vec<CallbackState>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self {
            session: RecordingSession::default(),
            mount: MountGuard::new(),
            navigations: RefCell::new(Vec::new()),
            shown: RefCell::new(Vec::new()),
        }
    }
}

impl SessionSink for RecordingHost {
    fn login(&self, identity: Identity) {
        self.session.login(identity);
    }

    fn logout(&self) {
        self.session.logout();
    }
}

impl CallbackHost for RecordingHost {
    fn is_active(&self) -> bool {
        self.mount.is_mounted()
    }

    fn navigate(&self, path: &str) {
        self.navigations.borrow_mut().push(path.to_owned());
    }

    fn show(&self, state: &CallbackState) {
        self.shown.borrow_mut().push(state.clone());
    }
}
