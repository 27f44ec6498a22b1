//! # kirana-core: Pure Business Logic for the Kirana POS Admin Client
//!
//! This crate holds every piece of client-side logic that can live without
//! I/O. The backend owns all durable state (inventory, ledgers, documents),
//! so "business logic" here means the view-side rules: cart math, payment
//! planning, derived list views, and wire types.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Kirana POS Admin Client                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  apps/admin (page controllers)                  │   │
//! │  │   Inventory ─ Customers ─ Vendors ─ Purchases ─ POS ─ Dashboard │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kirana-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  ledger   │   │   │
//! │  │   │ Inventory │  │   Money   │  │   Cart    │  │ payment   │   │   │
//! │  │   │ Sale ...  │  │  (paise)  │  │ CartLine  │  │ planning  │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │ listview  │  │ daterange │  │ validation│                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  kirana-client (HTTP layer)                     │   │
//! │  │         One typed function per backend REST endpoint            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Wire entities (InventoryItem, Customer, Sale, Purchase, ...)
//! - [`money`] - Money in integer paise, float rupees on the wire
//! - [`cart`] - Client-only POS cart with stock-snapshot caps
//! - [`ledger`] - Payment planning (settle / partial / add-dues)
//! - [`listview`] - Stable sorting, substring search, boolean filters
//! - [`daterange`] - Dashboard range presets
//! - [`validation`] - Form input validation
//! - [`error`] - Domain error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod daterange;
pub mod error;
pub mod ledger;
pub mod listview;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine};
pub use daterange::RangePreset;
pub use error::{CoreError, CoreResult, ValidationError};
pub use ledger::{LedgerAction, PaymentMode};
pub use listview::{SortDirection, SortState};
pub use money::Money;
pub use types::*;
