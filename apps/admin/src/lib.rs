//! # kirana-admin: Headless Admin Client for the Kirana POS Backend
//!
//! Page controllers plus the session and fetch layers. Everything a UI
//! shell needs is here as plain structs and async methods; the binary in
//! `main.rs` drives the same pages from a terminal.
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         kirana-admin                                    │
//! │                                                                         │
//! │  main.rs ────► logging, config, sign-in, store report                   │
//! │                                                                         │
//! │  session.rs ─► SignedOut ⇄ SignedIn state machine; 401 funnel           │
//! │                                                                         │
//! │  fetch.rs ───► Debouncer (keystrokes) + FetchSequence (stale discard)   │
//! │                                                                         │
//! │  pages/ ─────► Inventory  Customers  Vendors  Purchases                 │
//! │                SalesHistory  Pos  Dashboard                             │
//! │                  │                                                      │
//! │                  ▼                                                      │
//! │        kirana-client (HTTP) ──► backend REST API                        │
//! │        kirana-core (cart, ledger, listview, money)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod fetch;
pub mod pages;
pub mod session;

pub use config::AdminConfig;
pub use error::{AdminError, AdminResult};
pub use fetch::{Debouncer, FetchSequence, Ticket};
pub use session::{Session, SessionState};
