//! Application Layer
//!
//! One use case per cart operation.

pub mod add_item;
pub mod clear_cart;
pub mod config;
pub mod get_summary;
pub mod remove_item;
pub mod update_quantity;

// Re-exports
pub use add_item::{AddItemInput, AddItemUseCase};
pub use clear_cart::ClearCartUseCase;
pub use config::CartConfig;
pub use get_summary::GetSummaryUseCase;
pub use remove_item::RemoveItemUseCase;
pub use update_quantity::{UpdateQuantityInput, UpdateQuantityUseCase};
