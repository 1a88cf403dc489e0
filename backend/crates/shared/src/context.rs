//! Per-request identity context
//!
//! The session layer resolves who the request belongs to and inserts
//! [`RequestIdentity`] into the request extensions; downstream handlers read
//! it from there instead of consulting any ambient "current user" state.

use crate::id::UserId;

/// Identity of the user a request is acting for.
///
/// Present in request extensions only when the session layer found a valid,
/// reconciled authentication state for the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestIdentity {
    pub user_id: UserId,
}

impl RequestIdentity {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}
