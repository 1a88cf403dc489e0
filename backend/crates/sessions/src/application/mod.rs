//! Application Layer
//!
//! The reconciliation state machine, signed-token handling, and config.

pub mod config;
pub mod reconcile;
pub mod token;

// Re-exports
pub use config::SessionConfig;
pub use reconcile::{AuthSignals, ReconcileOutcome, ReconcileState, ReconcileUseCase};
pub use token::{SignedCookieIdentity, mint_session_token, parse_session_token};
