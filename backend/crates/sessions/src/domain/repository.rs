//! Repository Traits
//!
//! Interface for session persistence. Implementation is in the
//! infrastructure layer.

use crate::domain::entity::session::SessionRecord;
use crate::error::SessionResult;
use kernel::id::UserId;
use uuid::Uuid;

/// Session store trait
///
/// Invalidation is soft everywhere: rows flip `is_active` and stay in place
/// for audit; nothing in this trait deletes.
#[trait_variant::make(SessionStore: Send)]
pub trait LocalSessionStore {
    /// Persist a new session
    async fn create(&self, session: &SessionRecord) -> SessionResult<()>;

    /// Find a session by ID, active or not
    async fn find_by_id(&self, session_id: Uuid) -> SessionResult<Option<SessionRecord>>;

    /// Update a session (activity, expiry)
    async fn update(&self, session: &SessionRecord) -> SessionResult<()>;

    /// Soft-invalidate a session. Idempotent; unknown IDs are a no-op.
    async fn invalidate(&self, session_id: Uuid) -> SessionResult<()>;

    /// Soft-invalidate every active session of a user
    async fn invalidate_all_for_user(&self, user_id: &UserId) -> SessionResult<u64>;

    /// Soft-invalidate sessions whose expiry has passed; returns the count
    async fn cleanup_expired(&self) -> SessionResult<u64>;
}
