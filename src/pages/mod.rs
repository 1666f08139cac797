//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns its route-scoped orchestration (guards, async calls) and
//! delegates rendering details to `components`.

pub mod callback;
pub mod dashboard;
pub mod home;
pub mod login;
pub mod users;
