//! Shared Kernel - Domain-crossing minimal core
//!
//! The smallest vocabulary shared by every crate in the workspace:
//! - Unified error type and result aliases
//! - Typed entity IDs
//! - Money as integer minor units
//! - Per-request identity context
//!
//! **Design Principle**: only things that are hard to change and mean the
//! same thing across all domain crates belong here.

pub mod context;
pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
pub mod money;
