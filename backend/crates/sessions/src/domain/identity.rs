//! Identity Provider Seam
//!
//! The authentication side of reconciliation. The guard never inspects how
//! identity is established; it only asks "does this request carry valid
//! identity claims, and for whom". Sign-out is expressed as a reconciliation
//! outcome that the presentation layer turns into cookie deletion.

use kernel::id::UserId;

/// Identity claims asserted by the authentication cookie
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
}

impl Identity {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

/// Verifies opaque authentication-cookie values into identity claims.
///
/// Implementations must be pure verifiers: no side effects, no I/O. A
/// `None` simply means "this request is not authenticated".
pub trait IdentityProvider: Send + Sync {
    fn verify(&self, cookie_value: &str) -> Option<Identity>;
}
