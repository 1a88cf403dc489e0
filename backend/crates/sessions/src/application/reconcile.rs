//! Session Reconciliation Use Case
//!
//! Brings the two authentication signals - identity cookie and server-side
//! session store - into agreement. Exactly one of four transitions runs per
//! request, chosen by which signals are present; there is no fallthrough
//! between them and each transition is independently testable.
//!
//! | identity | session | transition                                     |
//! |----------|---------|------------------------------------------------|
//! | yes      | no      | recreate the session, or force sign-out        |
//! | no       | yes     | invalidate the orphaned session                |
//! | yes      | yes     | validate; extend, recreate, or clear both      |
//! | no       | no      | extend a remembered session, else no-op        |

use std::sync::Arc;

use platform::client::ClientFingerprint;
use uuid::Uuid;

use crate::application::config::SessionConfig;
use crate::application::token::mint_session_token;
use crate::domain::entity::session::SessionRecord;
use crate::domain::identity::Identity;
use crate::domain::repository::SessionStore;
use crate::error::SessionResult;

/// Everything the guard observed about the request, passed explicitly.
///
/// No ambient "current user" lookup: the middleware extracts these once and
/// the use case works only from them.
#[derive(Debug, Clone, Default)]
pub struct AuthSignals {
    /// Verified identity claims from the authentication cookie
    pub identity: Option<Identity>,
    /// Session ID from a verified session cookie token
    pub session_id: Option<Uuid>,
    /// Session ID from a verified remember-me marker cookie
    pub remember_session_id: Option<Uuid>,
    /// Client fingerprint of this request, if extractable
    pub fingerprint: Option<ClientFingerprint>,
}

impl AuthSignals {
    /// Classify which of the four transitions these signals select.
    pub fn state(&self) -> ReconcileState {
        ReconcileState::classify(self.identity.is_some(), self.session_id.is_some())
    }
}

/// The four-way presence classification of the two auth signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileState {
    /// Identity cookie only - the session went missing
    AuthOnly,
    /// Session cookie only - authentication went missing
    SessionOnly,
    /// Both signals present - the normal authenticated case
    Both,
    /// Neither signal - anonymous, or a remember-me returnee
    Neither,
}

impl ReconcileState {
    pub fn classify(is_authenticated: bool, has_session: bool) -> Self {
        match (is_authenticated, has_session) {
            (true, false) => ReconcileState::AuthOnly,
            (false, true) => ReconcileState::SessionOnly,
            (true, true) => ReconcileState::Both,
            (false, false) => ReconcileState::Neither,
        }
    }
}

/// Terminal state of one reconciliation pass.
///
/// Every variant funnels into continuing the request pipeline; outcomes only
/// instruct the middleware which cookies to set or clear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// A fresh session was created from the identity; set its cookie
    SessionRecreated { session_id: Uuid, token: String },
    /// Authentication must be cleared; delete the auth cookies
    SignedOut,
    /// An orphaned session was invalidated; delete the session cookie
    OrphanInvalidated,
    /// The existing session checked out and was extended
    Validated,
    /// Session and authentication were both cleared; delete all cookies
    Cleared,
    /// A remembered session's expiry was pushed out
    Extended,
    /// Nothing to reconcile
    Noop,
    /// Reconciliation itself failed; the request proceeds as if the guard
    /// had not run (fail-open policy, see crate docs)
    FailedOpen,
}

impl ReconcileOutcome {
    /// Whether the request's identity claims survived reconciliation.
    ///
    /// Only these outcomes let the middleware vouch for the identity to
    /// downstream handlers; everything else leaves the request anonymous.
    pub fn keeps_authentication(&self) -> bool {
        matches!(
            self,
            ReconcileOutcome::SessionRecreated { .. } | ReconcileOutcome::Validated
        )
    }

    /// Whether the middleware must delete the auth/session cookies.
    pub fn clears_cookies(&self) -> bool {
        matches!(
            self,
            ReconcileOutcome::SignedOut
                | ReconcileOutcome::OrphanInvalidated
                | ReconcileOutcome::Cleared
        )
    }
}

/// Session reconciliation use case
pub struct ReconcileUseCase<S>
where
    S: SessionStore + Send + Sync + 'static,
{
    store: Arc<S>,
    config: Arc<SessionConfig>,
}

impl<S> ReconcileUseCase<S>
where
    S: SessionStore + Send + Sync + 'static,
{
    pub fn new(store: Arc<S>, config: Arc<SessionConfig>) -> Self {
        Self { store, config }
    }

    /// Run one reconciliation pass.
    ///
    /// Errors are the store's; they are meaningful to callers that want to
    /// observe them (tests, diagnostics). Request handling goes through
    /// [`Self::execute_best_effort`] instead.
    pub async fn execute(&self, signals: &AuthSignals) -> SessionResult<ReconcileOutcome> {
        tracing::trace!(state = ?signals.state(), "Reconciling auth signals");

        // The tuple match mirrors the four-way classification exactly
        match (signals.identity.as_ref(), signals.session_id) {
            (Some(identity), None) => {
                self.recreate_session(identity, signals.fingerprint.as_ref())
                    .await
            }
            (None, Some(session_id)) => self.invalidate_orphan(session_id).await,
            (Some(identity), Some(session_id)) => {
                self.validate_pair(identity, session_id, signals.fingerprint.as_ref())
                    .await
            }
            (None, None) => self.extend_remembered(signals.remember_session_id).await,
        }
    }

    /// Run one reconciliation pass, absorbing all failures.
    ///
    /// This is the guard's documented availability contract: an error inside
    /// reconciliation is logged and collapsed to [`ReconcileOutcome::FailedOpen`]
    /// so the request continues as if the guard had not run. Callers cannot
    /// fail a request through this method.
    pub async fn execute_best_effort(&self, signals: &AuthSignals) -> ReconcileOutcome {
        match self.execute(signals).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(error = %e, "Session reconciliation failed, continuing fail-open");
                ReconcileOutcome::FailedOpen
            }
        }
    }

    /// AuthOnly: the identity is valid but its session is gone. Recreate it;
    /// if the store refuses, force a sign-out instead of serving a request
    /// whose two signals permanently disagree.
    async fn recreate_session(
        &self,
        identity: &Identity,
        fingerprint: Option<&ClientFingerprint>,
    ) -> SessionResult<ReconcileOutcome> {
        let session = SessionRecord::new(
            identity.user_id,
            fingerprint.map(|f| f.hash_vec()).unwrap_or_default(),
            fingerprint.and_then(|f| f.ip_string()),
            fingerprint.and_then(|f| f.user_agent.clone()),
            self.config.idle_timeout_chrono(),
        );

        match self.store.create(&session).await {
            Ok(()) => {
                tracing::info!(
                    session_id = %session.session_id,
                    user_id = %identity.user_id,
                    "Recreated session for authenticated identity"
                );
                let token = mint_session_token(&self.config.secret, session.session_id);
                Ok(ReconcileOutcome::SessionRecreated {
                    session_id: session.session_id,
                    token,
                })
            }
            Err(e) => {
                // Corrective action, not an error: expected self-healing path
                tracing::info!(
                    error = %e,
                    user_id = %identity.user_id,
                    "Session recreation failed, signing user out"
                );
                Ok(ReconcileOutcome::SignedOut)
            }
        }
    }

    /// SessionOnly: a session with no corresponding authentication is an
    /// orphan. Soft-invalidate it so it cannot resurface.
    async fn invalidate_orphan(&self, session_id: Uuid) -> SessionResult<ReconcileOutcome> {
        self.store.invalidate(session_id).await?;

        tracing::info!(session_id = %session_id, "Invalidated orphaned session");
        Ok(ReconcileOutcome::OrphanInvalidated)
    }

    /// Both: validate the session against the identity. A valid session is
    /// extended (expiry restarts from now). A cookie whose record is gone
    /// means there is no server-side session at all, so it reroutes to the
    /// recreation path; a session that exists but fails validation clears
    /// both signals so the next request starts from a clean slate.
    async fn validate_pair(
        &self,
        identity: &Identity,
        session_id: Uuid,
        fingerprint: Option<&ClientFingerprint>,
    ) -> SessionResult<ReconcileOutcome> {
        let session = self.store.find_by_id(session_id).await?;

        let Some(mut session) = session else {
            // The cookie points at a record that no longer exists, so the
            // server side really has no session. Same self-healing path as
            // a missing session cookie.
            tracing::info!(session_id = %session_id, "Session cookie without record, recreating");
            return self.recreate_session(identity, fingerprint).await;
        };

        let fingerprint_ok = !self.config.check_fingerprint
            || fingerprint
                .map(|f| session.fingerprint_matches(&f.hash))
                .unwrap_or(true);

        if session.is_valid_for(&identity.user_id) && fingerprint_ok {
            session.extend(self.config.idle_timeout_chrono());
            self.store.update(&session).await?;

            tracing::debug!(session_id = %session_id, "Session validated and extended");
            return Ok(ReconcileOutcome::Validated);
        }

        self.store.invalidate(session_id).await?;
        tracing::info!(
            session_id = %session_id,
            user_id = %identity.user_id,
            "Session failed validation, clearing session and signing out"
        );
        Ok(ReconcileOutcome::Cleared)
    }

    /// Neither: no auth, no session. A remember-me marker that resolves to a
    /// live session gets its expiry pushed out; everything else is a no-op.
    async fn extend_remembered(
        &self,
        remember_session_id: Option<Uuid>,
    ) -> SessionResult<ReconcileOutcome> {
        let Some(session_id) = remember_session_id else {
            return Ok(ReconcileOutcome::Noop);
        };

        match self.store.find_by_id(session_id).await? {
            Some(mut session) if session.is_active && !session.is_expired() => {
                session.extend(self.config.idle_timeout_chrono());
                self.store.update(&session).await?;

                tracing::debug!(session_id = %session_id, "Extended remembered session");
                Ok(ReconcileOutcome::Extended)
            }
            _ => Ok(ReconcileOutcome::Noop),
        }
    }
}
