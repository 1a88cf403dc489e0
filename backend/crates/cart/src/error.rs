//! Cart Error Types
//!
//! Cart-specific error variants that integrate with the unified
//! `kernel::error::AppError` system. Every failure the aggregator can
//! produce is a typed variant for the handler to translate; nothing panics
//! past the aggregator boundary.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Cart-specific result type alias
pub type CartResult<T> = Result<T, CartError>;

/// Cart-specific error variants
#[derive(Debug, Error)]
pub enum CartError {
    /// Requested quantity is not acceptable
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i32),

    /// Product is inactive or lacks stock for the requested quantity
    #[error("Product is unavailable in the requested quantity")]
    ProductUnavailable,

    /// No line item for the product in the cart
    #[error("Item not found in cart")]
    ItemNotFound,

    /// Request carries no reconciled identity
    #[error("Sign-in required")]
    SignInRequired,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CartError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            CartError::InvalidQuantity(_) => StatusCode::BAD_REQUEST,
            CartError::ProductUnavailable => StatusCode::CONFLICT,
            CartError::ItemNotFound => StatusCode::NOT_FOUND,
            CartError::SignInRequired => StatusCode::UNAUTHORIZED,
            CartError::Database(_) | CartError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CartError::InvalidQuantity(_) => ErrorKind::BadRequest,
            CartError::ProductUnavailable => ErrorKind::Conflict,
            CartError::ItemNotFound => ErrorKind::NotFound,
            CartError::SignInRequired => ErrorKind::Unauthorized,
            CartError::Database(_) | CartError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            CartError::Database(e) => {
                tracing::error!(error = %e, "Cart database error");
            }
            CartError::Internal(msg) => {
                tracing::error!(message = %msg, "Cart internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Cart validation error");
            }
        }
    }
}

impl IntoResponse for CartError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for CartError {
    fn from(err: AppError) -> Self {
        CartError::Internal(err.to_string())
    }
}
