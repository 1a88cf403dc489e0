//! Application Configuration
//!
//! Configuration for the session reconciliation layer.

use std::time::Duration;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Session layer configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Cookie carrying the signed session token
    pub session_cookie_name: String,
    /// Cookie carrying the signed identity claims
    pub identity_cookie_name: String,
    /// Remember-me marker cookie (a second signed session token)
    pub remember_cookie_name: String,
    /// Secret key for HMAC signing (32 bytes)
    pub secret: [u8; 32],
    /// Idle timeout; each successful reconciliation pushes expiry this far out
    pub idle_timeout: Duration,
    /// Path prefixes the guard skips entirely
    pub exempt_path_prefixes: Vec<String>,
    /// Whether to check User-Agent fingerprint drift during validation
    pub check_fingerprint: bool,
    /// Whether to require the Secure cookie attribute
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "store_session".to_string(),
            identity_cookie_name: "store_identity".to_string(),
            remember_cookie_name: "store_remember".to_string(),
            secret: [0u8; 32],
            idle_timeout: Duration::from_secs(30 * 60), // 30 minutes
            exempt_path_prefixes: vec![
                "/static".to_string(),
                "/assets".to_string(),
                "/favicon.ico".to_string(),
                "/health".to_string(),
                "/api/auth/login".to_string(),
                "/api/auth/logout".to_string(),
                "/api/auth/register".to_string(),
                "/api/auth/verify-email".to_string(),
            ],
            check_fingerprint: true,
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
        }
    }
}

impl SessionConfig {
    /// Config with a random secret (for development)
    pub fn with_random_secret() -> Self {
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&platform::crypto::random_bytes(32));
        Self {
            secret,
            ..Default::default()
        }
    }

    /// Config for development (insecure cookie, random secret)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Whether the guard skips this request path entirely.
    ///
    /// Exempt paths are where auth state is irrelevant (static assets,
    /// health checks) or is itself being established or torn down
    /// (login/logout/register/verification).
    pub fn is_exempt(&self, path: &str) -> bool {
        self.exempt_path_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }

    /// Idle timeout in milliseconds
    pub fn idle_timeout_ms(&self) -> i64 {
        self.idle_timeout.as_millis() as i64
    }

    /// Idle timeout as a chrono duration
    pub fn idle_timeout_chrono(&self) -> chrono::Duration {
        chrono::Duration::milliseconds(self.idle_timeout_ms())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exempt_paths() {
        let config = SessionConfig::default();
        assert!(config.is_exempt("/static/css/site.css"));
        assert!(config.is_exempt("/health"));
        assert!(config.is_exempt("/api/auth/login"));
        assert!(config.is_exempt("/api/auth/verify-email/abc123"));
        assert!(!config.is_exempt("/api/cart/summary"));
        assert!(!config.is_exempt("/api/products"));
    }

    #[test]
    fn test_default_idle_timeout() {
        let config = SessionConfig::default();
        assert_eq!(config.idle_timeout_ms(), 30 * 60 * 1000);
    }
}
