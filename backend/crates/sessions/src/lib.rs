//! Session Reconciliation Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Session entity, store and identity-provider traits
//! - `application/` - Reconciliation state machine, token handling, config
//! - `infra/` - PostgreSQL session store
//! - `presentation/` - Request-pipeline middleware
//!
//! ## Consistency Model
//! Authentication state arrives on two independent channels: the signed
//! identity cookie and the server-side session store. The reconciliation
//! guard runs before business logic on every non-exempt request and brings
//! the two back into agreement - recreating, extending, or invalidating the
//! session, or clearing authentication entirely.
//!
//! ## Availability Model
//! The guard is fail-open by policy: any error inside reconciliation is
//! logged and the request continues as if the guard had not run. A
//! reconciliation bug must never take the site down.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::SessionConfig;
pub use application::reconcile::{ReconcileOutcome, ReconcileUseCase};
pub use error::{SessionError, SessionResult};
pub use infra::postgres::PgSessionStore;
pub use presentation::middleware::{GuardState, reconcile_session};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::session::*;
    pub use crate::domain::identity::*;
}

pub mod store {
    pub use crate::infra::postgres::PgSessionStore as SessionStore;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
