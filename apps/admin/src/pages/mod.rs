//! Page controllers.
//!
//! Each page is a plain struct owning its fetched rows, its view state
//! (search, sort, filters, modals), and an `ApiClient` clone. Async methods
//! perform the fetches and mutations; pure methods derive what a table
//! would render. No page talks to another; shared facts live on the
//! backend and are re-fetched.

pub mod customers;
pub mod dashboard;
pub mod inventory;
pub mod pos;
pub mod purchases;
pub mod sales_history;
pub mod vendors;

pub use customers::CustomersPage;
pub use dashboard::DashboardPage;
pub use inventory::InventoryPage;
pub use pos::{CheckoutStage, PosPage};
pub use purchases::PurchasesPage;
pub use sales_history::SalesHistoryPage;
pub use vendors::VendorsPage;
