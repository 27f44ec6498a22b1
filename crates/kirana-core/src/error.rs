//! # Error Types
//!
//! Domain-specific error types for kirana-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kirana-core errors (this file)                                        │
//! │  ├── CoreError        - Ledger/cart rule violations                    │
//! │  └── ValidationError  - Form input validation failures                 │
//! │                                                                         │
//! │  kirana-client errors (separate crate)                                 │
//! │  └── ApiError         - Transport/status failures from the backend     │
//! │                                                                         │
//! │  apps/admin errors                                                     │
//! │  └── AdminError       - What page notices are rendered from            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AdminError → user notice          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (SKU, amounts, etc.)
//! 3. Errors are enum variants, never String

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations caught client-side, before a request is sent.
///
/// Every rule here is a UX convenience; the backend re-enforces each one and
/// stays the final authority.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Requested cart quantity exceeds the last-known stock snapshot.
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Item is not in the cart.
    #[error("Item {0} not in cart")]
    NotInCart(i64),

    /// Item id does not appear in the fetched list.
    #[error("Item {0} not found")]
    UnknownItem(i64),

    /// Checkout attempted with an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Cart quantity below one.
    #[error("Quantity must be at least 1")]
    InvalidQuantity,

    /// Payment amount fails the ledger rules (non-positive, or a partial
    /// payment exceeding the remaining balance).
    #[error("Invalid payment amount: {reason}")]
    InvalidPaymentAmount { reason: String },

    /// The document is already fully paid; nothing to settle.
    #[error("Nothing outstanding: {total} already paid")]
    NothingOutstanding { total: Money },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Form input validation errors.
///
/// These occur when user input doesn't meet requirements, before any
/// business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., bad amount string).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
