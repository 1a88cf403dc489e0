//! Reconciliation Middleware
//!
//! Runs before business logic on every non-exempt request. Reads the auth
//! signals from cookies, runs the reconciliation use case, and applies the
//! outcome's cookie directives to the response.
//!
//! This middleware never rejects a request. All of its outcomes, including
//! internal failures, funnel into `next.run(req)`.

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, header};
use axum::middleware::Next;
use axum::response::Response;
use platform::client::{extract_client_ip, extract_fingerprint};
use platform::cookie::{CookieConfig, extract_cookie};
use std::sync::Arc;

use crate::application::config::SessionConfig;
use crate::application::reconcile::{AuthSignals, ReconcileOutcome, ReconcileUseCase};
use crate::application::token::{SignedCookieIdentity, parse_session_token};
use crate::domain::identity::IdentityProvider;
use crate::domain::repository::SessionStore;
use kernel::context::RequestIdentity;

/// Middleware state
pub struct GuardState<S>
where
    S: SessionStore + Send + Sync + 'static,
{
    pub store: Arc<S>,
    pub config: Arc<SessionConfig>,
}

// Manual Clone: S itself does not need to be Clone behind the Arc.
impl<S> Clone for GuardState<S>
where
    S: SessionStore + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            config: self.config.clone(),
        }
    }
}

impl<S> GuardState<S>
where
    S: SessionStore + Send + Sync + 'static,
{
    pub fn new(store: Arc<S>, config: Arc<SessionConfig>) -> Self {
        Self { store, config }
    }
}

/// Middleware that reconciles auth-cookie state with the session store.
///
/// Exempt paths pass through untouched. For everything else the guard runs
/// one reconciliation pass (best-effort, fail-open), inserts
/// [`RequestIdentity`] into the request extensions when the identity
/// survived, and applies cookie directives to the response.
pub async fn reconcile_session<S>(
    State(state): State<GuardState<S>>,
    mut req: Request<Body>,
    next: Next,
) -> Response
where
    S: SessionStore + Send + Sync + 'static,
{
    if state.config.is_exempt(req.uri().path()) {
        return next.run(req).await;
    }

    let signals = gather_signals(&state.config, &req);

    let use_case = ReconcileUseCase::new(state.store.clone(), state.config.clone());
    let outcome = use_case.execute_best_effort(&signals).await;

    if outcome.keeps_authentication() {
        if let Some(identity) = &signals.identity {
            req.extensions_mut()
                .insert(RequestIdentity::new(identity.user_id));
        }
    }

    let mut response = next.run(req).await;
    apply_cookie_directives(&state.config, &outcome, &mut response);
    response
}

/// Extract the auth signals from the request. Anything malformed simply
/// reads as "absent"; reconciliation treats absence as the signal.
fn gather_signals(config: &SessionConfig, req: &Request<Body>) -> AuthSignals {
    let headers = req.headers();

    let client_ip = req
        .extensions()
        .get::<axum::extract::ConnectInfo<std::net::SocketAddr>>()
        .map(|info| info.0.ip());
    let client_ip = extract_client_ip(headers, client_ip);
    let fingerprint = extract_fingerprint(headers, client_ip).ok();

    let provider = SignedCookieIdentity::new(config.secret);
    let identity = extract_cookie(headers, &config.identity_cookie_name)
        .and_then(|value| provider.verify(&value));

    let session_id = extract_cookie(headers, &config.session_cookie_name)
        .and_then(|token| parse_session_token(&config.secret, &token).ok());

    let remember_session_id = extract_cookie(headers, &config.remember_cookie_name)
        .and_then(|token| parse_session_token(&config.secret, &token).ok());

    AuthSignals {
        identity,
        session_id,
        remember_session_id,
        fingerprint,
    }
}

fn session_cookie(config: &SessionConfig) -> CookieConfig {
    CookieConfig {
        name: config.session_cookie_name.clone(),
        secure: config.cookie_secure,
        http_only: true,
        same_site: config.cookie_same_site,
        path: "/".to_string(),
        max_age_secs: Some(config.idle_timeout.as_secs() as i64),
    }
}

fn named_cookie(config: &SessionConfig, name: &str) -> CookieConfig {
    CookieConfig {
        name: name.to_string(),
        secure: config.cookie_secure,
        http_only: true,
        same_site: config.cookie_same_site,
        path: "/".to_string(),
        max_age_secs: None,
    }
}

/// Translate the reconciliation outcome into Set-Cookie headers.
fn apply_cookie_directives(
    config: &SessionConfig,
    outcome: &ReconcileOutcome,
    response: &mut Response,
) {
    match outcome {
        ReconcileOutcome::SessionRecreated { token, .. } => {
            let cookie = platform::cookie::set_cookie_header(&session_cookie(config), token);
            response.headers_mut().append(header::SET_COOKIE, cookie);
        }
        ReconcileOutcome::OrphanInvalidated => {
            // The session is gone server-side; drop the stale cookie too
            let cookie = platform::cookie::delete_cookie_header(&session_cookie(config));
            response.headers_mut().append(header::SET_COOKIE, cookie);
        }
        ReconcileOutcome::SignedOut | ReconcileOutcome::Cleared => {
            for name in [
                config.session_cookie_name.as_str(),
                config.identity_cookie_name.as_str(),
                config.remember_cookie_name.as_str(),
            ] {
                let cookie =
                    platform::cookie::delete_cookie_header(&named_cookie(config, name));
                response.headers_mut().append(header::SET_COOKIE, cookie);
            }
        }
        ReconcileOutcome::Validated
        | ReconcileOutcome::Extended
        | ReconcileOutcome::Noop
        | ReconcileOutcome::FailedOpen => {}
    }
}
