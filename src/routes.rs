//! Client-side route paths shared by pages, guards and the reconciler.

/// Public entry page.
pub const HOME: &str = "/";
/// Login entry point; every user-visible auth failure links back here.
pub const LOGIN: &str = "/login";
/// Main authenticated landing page.
pub const DASHBOARD: &str = "/dashboard";
/// Admin-only user role management.
pub const USERS: &str = "/users";
