//! # Validation Module
//!
//! Form input validation for the admin pages.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Page controller (this module)                                │
//! │  ├── Field checks before a request is built                            │
//! │  └── Immediate feedback without a network round trip                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Backend                                                      │
//! │  └── Re-enforces everything; the client has no durable lock on stock   │
//! │      or balances between check and submit                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{ItemForm, PartyForm};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a display name (item, customer, or vendor).
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 200 characters
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a SKU.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Alphanumeric, hyphens, underscores only
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    let sku = sku.trim();

    if sku.is_empty() {
        return Err(ValidationError::Required {
            field: "sku".to_string(),
        });
    }

    if sku.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "sku".to_string(),
            max: 50,
        });
    }

    if !sku
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Parses a free-form amount string into Money.
///
/// Payment modals take free text; this is the single place it becomes a
/// number. The amount must parse and be strictly positive; the *direction*
/// of the amount (payment vs dues) is chosen by the ledger planner, never by
/// typing a sign here.
pub fn parse_entered_amount(input: &str) -> ValidationResult<Money> {
    let input = input.trim();

    if input.is_empty() {
        return Err(ValidationError::Required {
            field: "amount".to_string(),
        });
    }

    let rupees: f64 = input.parse().map_err(|_| ValidationError::InvalidFormat {
        field: "amount".to_string(),
        reason: format!("'{}' is not a number", input),
    })?;

    let amount = Money::from_rupees_f64(rupees);
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }

    Ok(amount)
}

// =============================================================================
// Form Validators
// =============================================================================

/// Validates an inventory item form before create/update.
pub fn validate_item_form(form: &ItemForm) -> ValidationResult<()> {
    validate_name(&form.name)?;
    validate_sku(&form.sku)?;

    if form.quantity < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "quantity".to_string(),
        });
    }
    if form.min_stock_level < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "min_stock_level".to_string(),
        });
    }
    if form.cost_price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "cost_price".to_string(),
        });
    }
    if form.selling_price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "selling_price".to_string(),
        });
    }

    Ok(())
}

/// Validates a customer/vendor form before create/update.
///
/// The opening balance may be any sign; negative is a legitimate way to
/// record pre-existing dues.
pub fn validate_party_form(form: &PartyForm) -> ValidationResult<()> {
    validate_name(&form.name)
}

// =============================================================================
// Unit Tests
// =============================================================================
