//! # Domain Types
//!
//! Wire entities consumed from and sent to the backend, plus the handful of
//! helper methods the view layer needs on them.
//!
//! ## Ownership Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  The BACKEND owns every persistent entity in this file.                 │
//! │                                                                         │
//! │  The client holds transient, denormalized copies: whatever the last     │
//! │  fetch returned. After every mutating call the page re-fetches; these   │
//! │  structs are never merged incrementally, only replaced wholesale.       │
//! │                                                                         │
//! │  Signed balance convention (ledger):                                    │
//! │    customer.current_balance < 0  →  customer owes us ("dues")           │
//! │    customer.current_balance > 0  →  advance/credit held                 │
//! │    vendor.current_balance   < 0  →  we owe the vendor                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Payment Status
// =============================================================================

/// Payment status of a sale or purchase document.
///
/// The backend stores these as display strings, `"Partially Paid"` included,
/// so the serde renames are part of the wire contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PaymentStatus {
    #[default]
    Paid,
    Due,
    #[serde(rename = "Partially Paid")]
    PartiallyPaid,
}

impl PaymentStatus {
    /// True if any balance remains on the document.
    pub fn has_outstanding(&self) -> bool {
        !matches!(self, PaymentStatus::Paid)
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Paid => write!(f, "Paid"),
            PaymentStatus::Due => write!(f, "Due"),
            PaymentStatus::PartiallyPaid => write!(f, "Partially Paid"),
        }
    }
}

// =============================================================================
// Inventory
// =============================================================================

/// A stocked item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: i64,
    pub name: String,
    pub sku: String,
    pub category: Option<String>,
    pub material: Option<String>,
    /// Units on hand. The backend guarantees this never goes below zero.
    pub quantity: i64,
    pub cost_price: Money,
    pub selling_price: Money,
    /// Reorder threshold; at or below it the item counts as low stock.
    pub min_stock_level: i64,
}

impl InventoryItem {
    /// Low stock is `quantity <= min_stock_level`, inclusive.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.min_stock_level
    }

    /// Value of stock on hand at cost.
    pub fn stock_value(&self) -> Money {
        self.cost_price.multiply_quantity(self.quantity)
    }
}

/// Create/update payload for an inventory item.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ItemForm {
    pub name: String,
    pub sku: String,
    pub category: Option<String>,
    pub material: Option<String>,
    pub quantity: i64,
    pub cost_price: Money,
    pub selling_price: Money,
    pub min_stock_level: i64,
}

impl ItemForm {
    /// Pre-fills the form from an existing item (edit mode).
    pub fn from_item(item: &InventoryItem) -> Self {
        ItemForm {
            name: item.name.clone(),
            sku: item.sku.clone(),
            category: item.category.clone(),
            material: item.material.clone(),
            quantity: item.quantity,
            cost_price: item.cost_price,
            selling_price: item.selling_price,
            min_stock_level: item.min_stock_level,
        }
    }
}

/// An item ranked by historical units sold (quick-add shortcuts).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopSeller {
    pub id: i64,
    pub name: String,
    pub sku: String,
    pub selling_price: Money,
    pub stock: i64,
    pub total_sold: i64,
}

// =============================================================================
// Parties: Customers & Vendors
// =============================================================================

/// A registered customer with a running ledger balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    /// Signed: negative = customer owes us, positive = advance held.
    pub current_balance: Money,
}

impl Customer {
    /// True if the customer owes the business money.
    #[inline]
    pub fn has_dues(&self) -> bool {
        self.current_balance.is_negative()
    }
}

/// A supplier with a running ledger balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vendor {
    pub id: i64,
    pub name: String,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    /// Signed: negative = we owe the vendor, positive = advance paid.
    pub current_balance: Money,
}

impl Vendor {
    /// True if the business owes this vendor money.
    #[inline]
    pub fn has_dues(&self) -> bool {
        self.current_balance.is_negative()
    }
}

/// Create/update payload shared by customers and vendors.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PartyForm {
    pub name: String,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub current_balance: Money,
}

/// A product frequently bought by one customer (ledger drill-down hint).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: i64,
    pub name: String,
    pub sku: String,
    pub selling_price: Money,
    pub stock: i64,
    pub total_purchased: i64,
}

// =============================================================================
// Sales
// =============================================================================

/// A line on a recorded sale.
///
/// Prices and costs are snapshots taken at sale time; later edits to the
/// item do not rewrite history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleLine {
    pub item_id: i64,
    pub quantity: i64,
    pub unit_price_at_sale: Money,
    pub unit_cost_at_sale: Money,
    pub item_name: Option<String>,
}

/// A recorded sale transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    pub id: i64,
    pub timestamp: NaiveDateTime,
    pub customer_id: Option<i64>,
    /// Kept for walk-ins and historical records without a customer link.
    pub customer_name: Option<String>,
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub paid_amount: Money,
    pub total_amount: Money,
    pub total_profit: Money,
    pub invoice_number: Option<String>,
    #[serde(default)]
    pub tax_amount: Money,
    #[serde(default)]
    pub items: Vec<SaleLine>,
}

impl Sale {
    /// Unpaid remainder, clamped at zero.
    pub fn remaining(&self) -> Money {
        self.total_amount.saturating_remaining(self.paid_amount)
    }

    /// A sale with no persisted customer record attached.
    pub fn is_walk_in(&self) -> bool {
        self.customer_id.is_none()
    }
}

/// A line in a sale being composed at the POS.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleDraftLine {
    pub item_id: i64,
    pub quantity: i64,
}

/// Checkout payload. The operator chooses the payment status explicitly;
/// it is a classification input, never computed from an entered amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleDraft {
    pub customer_name: Option<String>,
    pub customer_id: Option<i64>,
    pub payment_status: PaymentStatus,
    pub items: Vec<SaleDraftLine>,
}

/// Edit payload for a recorded sale.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SaleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
}

// =============================================================================
// Purchases
// =============================================================================

/// A line on a purchase order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseLine {
    pub item_id: i64,
    pub item_name: Option<String>,
    pub quantity: i64,
    pub unit_cost: Money,
}

/// A recorded purchase from a vendor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Purchase {
    pub id: i64,
    pub timestamp: NaiveDateTime,
    pub vendor_id: i64,
    pub vendor_name: Option<String>,
    pub invoice_number: Option<String>,
    pub total_amount: Money,
    #[serde(default)]
    pub paid_amount: Money,
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub items_count: i64,
    #[serde(default)]
    pub items: Vec<PurchaseLine>,
}

impl Purchase {
    /// Unpaid remainder, clamped at zero.
    pub fn remaining(&self) -> Money {
        self.total_amount.saturating_remaining(self.paid_amount)
    }
}

/// Edit payload for a recorded purchase.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PurchaseUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
}

/// Payload for recording a new purchase. Stock increments happen
/// server-side when this is accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseDraft {
    pub vendor_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    pub payment_status: PaymentStatus,
    pub items: Vec<PurchaseLine>,
}

// =============================================================================
// Payment Receipts
// =============================================================================

/// Acknowledgement of a party-ledger payment registration.
///
/// The backend answers with a message and the resulting balance, not the
/// full record; pages re-fetch for the updated row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerReceipt {
    pub message: String,
    pub new_balance: Money,
}

/// Acknowledgement of a payment against a purchase document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchasePaymentReceipt {
    pub message: String,
    pub status: PaymentStatus,
    pub paid_amount: Money,
    pub total_amount: Money,
}

// =============================================================================
// Analytics
// =============================================================================

/// Aggregate dashboard stats for a date range. Backend-computed; the client
/// only renders these numbers.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DashboardStats {
    pub total_sales_count: i64,
    pub total_revenue: Money,
    pub total_profit: Money,
    #[serde(default)]
    pub total_expense: Money,
    pub current_stock_value: Money,
}

/// One day of the sales trend series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: chrono::NaiveDate,
    pub amount: Money,
    pub profit: Money,
}

// =============================================================================
// Auth
// =============================================================================

/// The signed-in user as reported by `/auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub username: String,
    pub role: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
