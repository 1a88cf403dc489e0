//! Application Configuration
//!
//! Configuration for the cart application layer.

/// Cart application configuration
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Upper bound on the quantity of a single line item
    pub max_line_quantity: i32,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            max_line_quantity: 99,
        }
    }
}
