//! PostgreSQL Session Store

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::session::SessionRecord;
use crate::domain::repository::SessionStore;
use crate::error::SessionResult;
use kernel::id::UserId;

/// PostgreSQL-backed session store
///
/// All invalidation paths are soft (`is_active = FALSE`); rows are kept for
/// audit. Activity/expiry updates are last-writer-wins: both fields only
/// ever move forward, so concurrent requests from the same user cannot
/// corrupt them.
#[derive(Clone)]
pub struct PgSessionStore {
    pool: PgPool,
}

impl PgSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    session_id: Uuid,
    user_id: Uuid,
    is_active: bool,
    expires_at_ms: i64,
    client_fingerprint_hash: Vec<u8>,
    client_ip: Option<String>,
    user_agent: Option<String>,
    created_at: DateTime<Utc>,
    last_activity_at: DateTime<Utc>,
}

impl SessionRow {
    fn into_record(self) -> SessionRecord {
        SessionRecord {
            session_id: self.session_id,
            user_id: UserId::from_uuid(self.user_id),
            is_active: self.is_active,
            expires_at_ms: self.expires_at_ms,
            client_fingerprint_hash: self.client_fingerprint_hash,
            client_ip: self.client_ip,
            user_agent: self.user_agent,
            created_at: self.created_at,
            last_activity_at: self.last_activity_at,
        }
    }
}

impl SessionStore for PgSessionStore {
    async fn create(&self, session: &SessionRecord) -> SessionResult<()> {
        sqlx::query(
            r#"
            INSERT INTO sessions (
                session_id,
                user_id,
                is_active,
                expires_at_ms,
                client_fingerprint_hash,
                client_ip,
                user_agent,
                created_at,
                last_activity_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(session.session_id)
        .bind(session.user_id.as_uuid())
        .bind(session.is_active)
        .bind(session.expires_at_ms)
        .bind(&session.client_fingerprint_hash)
        .bind(&session.client_ip)
        .bind(&session.user_agent)
        .bind(session.created_at)
        .bind(session.last_activity_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, session_id: Uuid) -> SessionResult<Option<SessionRecord>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT
                session_id,
                user_id,
                is_active,
                expires_at_ms,
                client_fingerprint_hash,
                client_ip,
                user_agent,
                created_at,
                last_activity_at
            FROM sessions
            WHERE session_id = $1
            "#,
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(SessionRow::into_record))
    }

    async fn update(&self, session: &SessionRecord) -> SessionResult<()> {
        sqlx::query(
            r#"
            UPDATE sessions
            SET is_active = $2,
                expires_at_ms = $3,
                last_activity_at = $4
            WHERE session_id = $1
            "#,
        )
        .bind(session.session_id)
        .bind(session.is_active)
        .bind(session.expires_at_ms)
        .bind(session.last_activity_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn invalidate(&self, session_id: Uuid) -> SessionResult<()> {
        sqlx::query("UPDATE sessions SET is_active = FALSE WHERE session_id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn invalidate_all_for_user(&self, user_id: &UserId) -> SessionResult<u64> {
        let affected =
            sqlx::query("UPDATE sessions SET is_active = FALSE WHERE user_id = $1 AND is_active")
                .bind(user_id.as_uuid())
                .execute(&self.pool)
                .await?
                .rows_affected();

        Ok(affected)
    }

    async fn cleanup_expired(&self) -> SessionResult<u64> {
        let now_ms = Utc::now().timestamp_millis();

        let deactivated = sqlx::query(
            "UPDATE sessions SET is_active = FALSE WHERE is_active AND expires_at_ms < $1",
        )
        .bind(now_ms)
        .execute(&self.pool)
        .await?
        .rows_affected();

        tracing::info!(
            sessions_deactivated = deactivated,
            "Deactivated expired sessions"
        );

        Ok(deactivated)
    }
}
