//! # candidate-client
//!
//! Leptos + WASM frontend for the Candidate Organizer job-candidate tracker.
//!
//! The crate owns the browser side of the authentication lifecycle: the API
//! gateway client, the auth service built on it, the process-wide session
//! store, the OAuth callback reconciler and the per-page route guards. Pages
//! and components are thin views over that core.
//!
//! Browser-only behavior is gated behind the `csr` feature. Without it every
//! network and timer path degrades to a deterministic no-op, which keeps the
//! state machines testable on the host.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod routes;
pub mod state;
pub mod util;

#[cfg(test)]
pub(crate) mod testing;

/// WASM entry point: install console logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::mount_to_body(app::App);
}
