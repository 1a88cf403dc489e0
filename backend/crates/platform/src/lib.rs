//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no business rules of their own:
//! - Cookie building and parsing
//! - Client identification (fingerprint, forwarded IP)
//! - Small cryptographic helpers (SHA-256, random bytes)

pub mod client;
pub mod cookie;
pub mod crypto;
