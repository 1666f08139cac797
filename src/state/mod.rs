//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `session` is the process-wide authentication state; `callback` is the
//! one-shot OAuth redirect state machine that feeds it.

pub mod callback;
pub mod session;
