//! Signed Cookie Tokens
//!
//! Both cookies the guard reads share one scheme: `<payload>.<signature>`
//! where the signature is base64url(HMAC-SHA256(secret, payload)). The
//! session token's payload is the session UUID; the identity cookie's
//! payload is the user UUID.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

use crate::domain::identity::{Identity, IdentityProvider};
use crate::error::{SessionError, SessionResult};
use kernel::id::UserId;

type HmacSha256 = Hmac<Sha256>;

fn sign(secret: &[u8; 32], payload: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(payload.as_bytes());
    URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
}

fn verify_signed(secret: &[u8; 32], token: &str) -> Option<String> {
    let (payload, signature_b64) = token.split_once('.')?;

    let mut mac =
        HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(payload.as_bytes());

    let signature = URL_SAFE_NO_PAD.decode(signature_b64).ok()?;
    mac.verify_slice(&signature).ok()?;

    Some(payload.to_string())
}

/// Mint the session cookie token for a session ID.
pub fn mint_session_token(secret: &[u8; 32], session_id: Uuid) -> String {
    let payload = session_id.to_string();
    let signature = sign(secret, &payload);
    format!("{payload}.{signature}")
}

/// Parse and verify a session cookie token into its session ID.
pub fn parse_session_token(secret: &[u8; 32], token: &str) -> SessionResult<Uuid> {
    let payload = verify_signed(secret, token).ok_or(SessionError::TokenInvalid)?;
    payload.parse().map_err(|_| SessionError::TokenInvalid)
}

/// Mint the identity cookie value for a user.
///
/// Issued by the sign-in flow (an external collaborator); minted here so
/// that tests and tooling share one definition of the format.
pub fn mint_identity_token(secret: &[u8; 32], user_id: &UserId) -> String {
    let payload = user_id.to_string();
    let signature = sign(secret, &payload);
    format!("{payload}.{signature}")
}

/// HMAC-verifying identity provider over the signed identity cookie.
#[derive(Debug, Clone)]
pub struct SignedCookieIdentity {
    secret: [u8; 32],
}

impl SignedCookieIdentity {
    pub fn new(secret: [u8; 32]) -> Self {
        Self { secret }
    }
}

impl IdentityProvider for SignedCookieIdentity {
    fn verify(&self, cookie_value: &str) -> Option<Identity> {
        let payload = verify_signed(&self.secret, cookie_value)?;
        let user_id: UserId = payload.parse().ok()?;
        Some(Identity::new(user_id))
    }
}
