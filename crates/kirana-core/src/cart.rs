//! # Cart Module
//!
//! The client-only shopping cart assembled at the POS page. Nothing here is
//! ever persisted; a cart lives exactly as long as one checkout attempt and
//! leaves the process only as a [`SaleDraft`].
//!
//! ## Snapshot Semantics
//! Each line freezes the item's name, price, and stock level at the moment
//! it was added. Quantity caps are checked against that snapshot; a
//! concurrent sale by another session is invisible until the next inventory
//! fetch, and the backend re-checks stock at checkout anyway.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{InventoryItem, PaymentStatus, SaleDraft, SaleDraftLine};

/// A line in the cart: item snapshot + chosen quantity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub item_id: i64,
    /// Name at time of adding (frozen).
    pub name: String,
    /// Selling price at time of adding (frozen).
    pub unit_price: Money,
    /// Stock level at time of adding; the cap for this line.
    pub available: i64,
    pub quantity: i64,
}

impl CartLine {
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

/// The cart being built for one sale.
///
/// ## Invariants
/// - Lines are unique by `item_id` (adding the same item increases quantity)
/// - Every line satisfies `quantity >= 1` and `quantity <= available`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Quantity of one item already in the cart.
    pub fn quantity_of(&self, item_id: i64) -> i64 {
        self.lines
            .iter()
            .find(|l| l.item_id == item_id)
            .map(|l| l.quantity)
            .unwrap_or(0)
    }

    /// Adds an item, enforcing `requested + existing <= snapshot stock`.
    pub fn add(&mut self, item: &InventoryItem, quantity: i64) -> CoreResult<()> {
        if quantity < 1 {
            return Err(CoreError::InvalidQuantity);
        }

        let existing = self.quantity_of(item.id);
        if existing + quantity > item.quantity {
            return Err(CoreError::InsufficientStock {
                name: item.name.clone(),
                available: item.quantity,
                requested: existing + quantity,
            });
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.item_id == item.id) {
            line.quantity += quantity;
            // Refresh the snapshot cap in case a newer fetch raised it
            line.available = item.quantity;
            return Ok(());
        }

        self.lines.push(CartLine {
            item_id: item.id,
            name: item.name.clone(),
            unit_price: item.selling_price,
            available: item.quantity,
            quantity,
        });
        Ok(())
    }

    /// Sets a line's quantity directly (the cart-row quantity input).
    pub fn set_quantity(&mut self, item_id: i64, quantity: i64) -> CoreResult<()> {
        let line = self
            .lines
            .iter_mut()
            .find(|l| l.item_id == item_id)
            .ok_or(CoreError::NotInCart(item_id))?;

        if quantity < 1 {
            return Err(CoreError::InvalidQuantity);
        }
        if quantity > line.available {
            return Err(CoreError::InsufficientStock {
                name: line.name.clone(),
                available: line.available,
                requested: quantity,
            });
        }

        line.quantity = quantity;
        Ok(())
    }

    pub fn remove(&mut self, item_id: i64) -> CoreResult<()> {
        let before = self.lines.len();
        self.lines.retain(|l| l.item_id != item_id);
        if self.lines.len() == before {
            return Err(CoreError::NotInCart(item_id));
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Cart total at snapshot prices. The backend recomputes from current
    /// prices at checkout; this figure is display-only.
    pub fn total(&self) -> Money {
        self.lines.iter().map(|l| l.line_total()).sum()
    }

    /// Freezes the cart into a checkout payload.
    pub fn to_draft(
        &self,
        customer_id: Option<i64>,
        customer_name: Option<String>,
        payment_status: PaymentStatus,
    ) -> CoreResult<SaleDraft> {
        if self.is_empty() {
            return Err(CoreError::EmptyCart);
        }
        Ok(SaleDraft {
            customer_id,
            customer_name,
            payment_status,
            items: self
                .lines
                .iter()
                .map(|l| SaleDraftLine {
                    item_id: l.item_id,
                    quantity: l.quantity,
                })
                .collect(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
