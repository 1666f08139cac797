//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules keep routing, error and lifecycle policy out of page
//! components so the same rules apply on every route.

pub mod errors;
pub mod guard;
pub mod mount;
pub mod task;
