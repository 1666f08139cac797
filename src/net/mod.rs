//! Networking modules for the REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` is the transport seam over the browser's fetch, `api` is the single
//! gateway every backend call goes through, `auth` and `users` are domain
//! services layered on the gateway, and `types` defines the wire schema.

pub mod api;
pub mod auth;
pub mod http;
pub mod timeout;
pub mod types;
pub mod users;
