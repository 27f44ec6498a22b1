//! # kirana-client: Typed REST Client for the Kirana POS Backend
//!
//! One typed async function per backend endpoint, grouped by resource.
//! This crate does transport only: authentication headers, JSON codecs,
//! multipart uploads, and error mapping. Payment planning, cart math, and
//! every other business rule live in `kirana-core`; page orchestration
//! lives in the admin app above.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          kirana-client                                  │
//! │                                                                         │
//! │    ApiClient ──┬── auth()        login / logout                         │
//! │     (http.rs)  ├── inventory()   list / create / update / delete        │
//! │                ├── customers()   CRUD / apply_ledger / recommendations  │
//! │                ├── vendors()     CRUD / apply_ledger                    │
//! │                ├── sales()       create / list / pay / unpay / delete   │
//! │                ├── purchases()   create / list / pay / unpay / delete   │
//! │                ├── analytics()   dashboard / trend / insights           │
//! │                └── transfer()    import / export / template             │
//! │                                                                         │
//! │    TokenStore (token.rs): shared bearer token, optional disk persist    │
//! │    ApiError   (error.rs): transport / 401 / backend-detail / decode     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod analytics;
pub mod auth;
pub mod customers;
pub mod error;
pub mod http;
pub mod inventory;
pub mod purchases;
pub mod sales;
pub mod token;
pub mod transfer;
pub mod vendors;

pub use auth::LoginResponse;
pub use error::{ApiError, ApiResult};
pub use http::ApiClient;
pub use sales::SaleFilters;
pub use token::TokenStore;
pub use transfer::{DataKind, ImportReport};
