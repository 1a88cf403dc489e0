//! Presentation Layer
//!
//! The request-pipeline middleware.

pub mod middleware;

pub use middleware::{GuardState, reconcile_session};
