//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components are small views shared across pages. They read the session from
//! Leptos context and never call the backend themselves.

pub mod loading;
pub mod role_badge;
pub mod route_guard;
