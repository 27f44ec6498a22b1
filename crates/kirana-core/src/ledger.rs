//! # Ledger Module
//!
//! Payment planning for party balances (customers, vendors) and for
//! documents (sales, purchases). This is the client half of the
//! balance-reconciliation workflow; the backend applies the amounts and owns
//! the resulting balances.
//!
//! ## The Two Ledgers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PARTY LEDGER (customer / vendor)                                       │
//! │                                                                         │
//! │  current_balance is signed:  < 0 → party owes (customer) or we owe      │
//! │                                    (vendor); "dues"                     │
//! │                              > 0 → advance/credit held                  │
//! │                                                                         │
//! │  Settle      → pay exactly abs(balance), bringing it to zero            │
//! │  Partial(x)  → pay x, any positive amount                               │
//! │  AddDues(x)  → record x of NEW debt (balance moves further negative)    │
//! │                                                                         │
//! │  DOCUMENT LEDGER (sale / purchase)                                      │
//! │                                                                         │
//! │  remaining = total_amount − paid_amount, never negative                 │
//! │                                                                         │
//! │  Settle      → pay exactly the remaining amount                         │
//! │  Partial(x)  → pay x, where 0 < x ≤ remaining                           │
//! │  AddDues     → rejected, documents only ever get paid down              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Sign Discipline
//! The backend's payments endpoint takes one signed amount: positive pays a
//! balance down, negative records new debt. That sign overload lives in
//! exactly one function here, [`LedgerAction::signed_amount`]. Everything
//! else speaks in named operations.

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::PaymentStatus;

// =============================================================================
// Payment Mode
// =============================================================================

/// What the operator chose in a payment modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMode {
    /// Full settlement: clear the outstanding balance exactly.
    Settle,
    /// Partial payment of a free-form amount (already validated positive).
    Partial(Money),
    /// Record new dues/debt of the given amount (party ledgers only).
    AddDues(Money),
}

// =============================================================================
// Ledger Action
// =============================================================================

/// A planned mutation of a party ledger, as a named operation.
///
/// Both variants carry a positive amount; direction is in the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerAction {
    /// Pay the balance down by the given positive amount.
    RecordPayment(Money),
    /// Increase outstanding dues by the given positive amount.
    RecordDebt(Money),
}

impl LedgerAction {
    /// Collapses the action to the backend's signed-amount convention:
    /// payments are positive, debts are negative.
    ///
    /// This is the only place in the codebase where the sign overload
    /// exists.
    pub fn signed_amount(&self) -> Money {
        match self {
            LedgerAction::RecordPayment(amount) => *amount,
            LedgerAction::RecordDebt(amount) => -*amount,
        }
    }
}

// =============================================================================
// Planning
// =============================================================================

/// Plans a party-ledger mutation from the modal state.
///
/// `balance` is the party's balance at the moment the modal opened. If the
/// underlying record changes before confirmation the caller must re-plan
/// with the fresh balance; a settlement amount is never cached.
pub fn plan_party_payment(balance: Money, mode: PaymentMode) -> CoreResult<LedgerAction> {
    match mode {
        PaymentMode::Settle => {
            let amount = balance.abs();
            if amount.is_zero() {
                return Err(CoreError::NothingOutstanding {
                    total: Money::zero(),
                });
            }
            Ok(LedgerAction::RecordPayment(amount))
        }
        PaymentMode::Partial(amount) => {
            if !amount.is_positive() {
                return Err(CoreError::InvalidPaymentAmount {
                    reason: "amount must be positive".to_string(),
                });
            }
            Ok(LedgerAction::RecordPayment(amount))
        }
        PaymentMode::AddDues(amount) => {
            if !amount.is_positive() {
                return Err(CoreError::InvalidPaymentAmount {
                    reason: "dues amount must be positive".to_string(),
                });
            }
            Ok(LedgerAction::RecordDebt(amount))
        }
    }
}

/// Plans a payment against a sale or purchase document.
///
/// Returns the positive amount to post. Partial payments may not exceed the
/// remaining balance; checked exactly in paise, no float epsilon needed.
pub fn plan_document_payment(
    total: Money,
    paid: Money,
    mode: PaymentMode,
) -> CoreResult<Money> {
    let remaining = total.saturating_remaining(paid);

    match mode {
        PaymentMode::Settle => {
            if remaining.is_zero() {
                return Err(CoreError::NothingOutstanding { total });
            }
            Ok(remaining)
        }
        PaymentMode::Partial(amount) => {
            if !amount.is_positive() {
                return Err(CoreError::InvalidPaymentAmount {
                    reason: "amount must be positive".to_string(),
                });
            }
            if amount > remaining {
                return Err(CoreError::InvalidPaymentAmount {
                    reason: format!("{} exceeds remaining balance {}", amount, remaining),
                });
            }
            Ok(amount)
        }
        PaymentMode::AddDues(_) => Err(CoreError::InvalidPaymentAmount {
            reason: "dues can only be added on a customer or vendor ledger".to_string(),
        }),
    }
}

/// Predicts the payment status the backend will derive after a payment.
///
/// Display-only: the page shows this while the re-fetch is in flight, then
/// replaces it with whatever the backend actually returned.
pub fn derive_payment_status(total: Money, paid: Money) -> PaymentStatus {
    if paid >= total {
        PaymentStatus::Paid
    } else if paid.is_positive() {
        PaymentStatus::PartiallyPaid
    } else {
        PaymentStatus::Due
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
