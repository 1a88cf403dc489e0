//! Session Record Entity
//!
//! The server-side half of the authentication state. Stored in the database
//! and referenced by a signed cookie token. Sessions follow a soft
//! lifecycle: invalidation flips `is_active`, rows are never deleted by the
//! reconciliation path.

use chrono::{DateTime, Duration, Utc};
use kernel::id::UserId;
use uuid::Uuid;

/// Server-side session record
#[derive(Debug, Clone)]
pub struct SessionRecord {
    /// Session ID (UUID v4), the opaque key the cookie token carries
    pub session_id: Uuid,
    /// Owning user; fixed for the lifetime of the session
    pub user_id: UserId,
    /// Whether the session is live (false after invalidation)
    pub is_active: bool,
    /// Session expiration (Unix timestamp ms); advances on reconciliation
    pub expires_at_ms: i64,
    /// Client fingerprint hash (User-Agent based) captured at creation
    pub client_fingerprint_hash: Vec<u8>,
    /// Client IP at creation (for diagnostics)
    pub client_ip: Option<String>,
    /// User agent string at creation
    pub user_agent: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Last activity timestamp
    pub last_activity_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Create a new active session for `user_id`.
    ///
    /// The idle timeout comes from the application layer (config), not
    /// hard-coded here.
    pub fn new(
        user_id: UserId,
        fingerprint_hash: Vec<u8>,
        client_ip: Option<String>,
        user_agent: Option<String>,
        idle_timeout: Duration,
    ) -> Self {
        let now = Utc::now();

        Self {
            session_id: Uuid::new_v4(),
            user_id,
            is_active: true,
            expires_at_ms: (now + idle_timeout).timestamp_millis(),
            client_fingerprint_hash: fingerprint_hash,
            client_ip,
            user_agent,
            created_at: now,
            last_activity_at: now,
        }
    }

    /// Check if the session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }

    /// Update the last activity timestamp
    pub fn touch(&mut self) {
        self.last_activity_at = Utc::now();
    }

    /// Reset expiry to now + idle timeout and record the activity.
    ///
    /// This is the "extension" a successful reconciliation performs: the
    /// expiry window restarts from the current request, it does not stack
    /// on the previous deadline.
    pub fn extend(&mut self, idle_timeout: Duration) {
        let now = Utc::now();
        self.expires_at_ms = (now + idle_timeout).timestamp_millis();
        self.last_activity_at = now;
    }

    /// Deactivate the session (soft invalidation)
    pub fn invalidate(&mut self) {
        self.is_active = false;
    }

    /// Session validity: active, unexpired, and owned by `user_id`.
    pub fn is_valid_for(&self, user_id: &UserId) -> bool {
        self.is_active && !self.is_expired() && self.user_id == *user_id
    }

    /// Check the recorded client fingerprint against the current request's.
    ///
    /// An empty recorded hash means the session was created without one and
    /// drift cannot be judged; treat that as a match.
    pub fn fingerprint_matches(&self, hash: &[u8]) -> bool {
        self.client_fingerprint_hash.is_empty()
            || platform::crypto::constant_time_eq(&self.client_fingerprint_hash, hash)
    }

    /// Remaining time until expiration
    pub fn remaining_ms(&self) -> i64 {
        let now_ms = Utc::now().timestamp_millis();
        (self.expires_at_ms - now_ms).max(0)
    }
}
