//! Point-of-sale page: item search, the cart, customer attachment, and
//! checkout.
//!
//! ## Checkout With a New Customer
//! Attaching a brand-new customer makes checkout two backend calls: create
//! the customer, then post the sale. The backend has no customer delete,
//! so a failed sale cannot roll the first call back. Instead the page
//! remembers the id it just created; retrying the checkout reuses it and
//! never mints a duplicate customer.
//!
//! ```text
//!   checkout ──► create customer ──► post sale ──► OK: forget the id
//!                      │                 │
//!                      │                 └─ FAIL: keep the id
//!                      ▼                         retry skips creation
//!              created_customer_id
//! ```

use kirana_client::ApiClient;
use kirana_core::cart::Cart;
use kirana_core::error::CoreError;
use kirana_core::listview::matches_search;
use kirana_core::types::{
    InventoryItem, PartyForm, PaymentStatus, Recommendation, Sale, TopSeller,
};
use kirana_core::validation::validate_party_form;
use tracing::{info, warn};

use crate::error::AdminResult;
use crate::fetch::Debouncer;

/// Where a checkout stands, for the UI to render against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckoutStage {
    /// Empty cart, nothing in flight.
    #[default]
    Idle,
    /// The cart holds at least one line.
    Building,
    /// The sale (and any new customer) is being posted.
    Submitting,
    /// The last checkout succeeded; the receipt is on screen.
    ReceiptShown,
    /// The last checkout failed; the cart is intact for a retry.
    Failed,
}

/// Who the sale is for.
#[derive(Debug, Clone, Default)]
pub enum CustomerChoice {
    /// Anonymous counter sale, with an optional free-text name.
    #[default]
    WalkIn,
    WalkInNamed(String),
    /// A registered customer picked from the list.
    Existing { id: i64, name: String },
    /// A customer to register as part of this checkout.
    New(PartyForm),
}

pub struct PosPage {
    client: ApiClient,
    pub cart: Cart,
    items: Vec<InventoryItem>,
    top_sellers: Vec<TopSeller>,
    pub search: String,
    pub customer: CustomerChoice,
    pub payment_status: PaymentStatus,
    /// Customer created by a checkout whose sale has not succeeded yet.
    created_customer_id: Option<i64>,
    stage: CheckoutStage,
    debouncer: Debouncer,
}

impl PosPage {
    pub fn new(client: ApiClient, debounce_ms: u64) -> Self {
        PosPage {
            client,
            cart: Cart::new(),
            items: Vec::new(),
            top_sellers: Vec::new(),
            search: String::new(),
            customer: CustomerChoice::default(),
            payment_status: PaymentStatus::Paid,
            created_customer_id: None,
            stage: CheckoutStage::Idle,
            debouncer: Debouncer::from_millis(debounce_ms),
        }
    }

    pub fn stage(&self) -> CheckoutStage {
        self.stage
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn top_sellers(&self) -> &[TopSeller] {
        &self.top_sellers
    }

    // =========================================================================
    // Fetching
    // =========================================================================

    /// Page open: item list and the quick-add strip together.
    pub async fn open(&mut self) -> AdminResult<()> {
        let inventory = self.client.inventory();
        let (items, top) = tokio::join!(
            inventory.list(None),
            inventory.top_sellers(8),
        );
        self.items = items?;
        self.top_sellers = top?;
        Ok(())
    }

    pub async fn search_changed(&mut self, term: &str) -> AdminResult<()> {
        self.search = term.to_string();
        let Some(ticket) = self.debouncer.settle().await else {
            return Ok(());
        };
        let term = if self.search.trim().is_empty() {
            None
        } else {
            Some(self.search.as_str())
        };
        let items = self.client.inventory().list(term).await?;
        if ticket.is_current() {
            self.items = items;
        }
        Ok(())
    }

    /// Items this customer buys often, shown alongside the quick-add strip.
    pub async fn recommendations_for(&self, customer_id: i64) -> AdminResult<Vec<Recommendation>> {
        Ok(self.client.customers().recommendations(customer_id).await?)
    }

    /// Products offered for sale: the fetched rows minus anything with no
    /// stock, refined by the search box locally between server fetches.
    pub fn sellable(&self) -> Vec<&InventoryItem> {
        self.items
            .iter()
            .filter(|i| i.quantity > 0)
            .filter(|i| matches_search(&self.search, &[&i.name, &i.sku]))
            .collect()
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Adds an item to the cart by id, using the fetched row as the stock
    /// and price snapshot.
    pub fn add_to_cart(&mut self, item_id: i64, quantity: i64) -> AdminResult<()> {
        let item = self
            .items
            .iter()
            .find(|i| i.id == item_id)
            .ok_or(CoreError::UnknownItem(item_id))?;
        self.cart.add(item, quantity)?;
        self.stage = CheckoutStage::Building;
        Ok(())
    }

    // =========================================================================
    // Customer Selection
    // =========================================================================

    pub fn choose_customer(&mut self, choice: CustomerChoice) {
        // A half-finished checkout's created customer belongs to the
        // previous choice; forget it when the operator picks someone else.
        self.created_customer_id = None;
        self.customer = choice;
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Posts the sale. On failure the cart and any customer already
    /// created stay put, so the operator can retry as-is.
    pub async fn checkout(&mut self) -> AdminResult<Sale> {
        self.stage = CheckoutStage::Submitting;
        match self.submit().await {
            Ok(sale) => {
                self.stage = CheckoutStage::ReceiptShown;
                Ok(sale)
            }
            Err(e) => {
                self.stage = CheckoutStage::Failed;
                Err(e)
            }
        }
    }

    async fn submit(&mut self) -> AdminResult<Sale> {
        let (customer_id, customer_name) = self.resolve_customer().await?;

        let draft = self
            .cart
            .to_draft(customer_id, customer_name, self.payment_status)?;
        let sale = self.client.sales().create(&draft).await?;

        info!(
            sale_id = sale.id,
            total = %sale.total_amount,
            "Checkout complete"
        );
        self.cart.clear();
        self.created_customer_id = None;
        self.customer = CustomerChoice::WalkIn;
        self.payment_status = PaymentStatus::Paid;

        // Stock changed; refresh the fetched rows
        self.items = self.client.inventory().list(None).await?;
        Ok(sale)
    }

    async fn resolve_customer(&mut self) -> AdminResult<(Option<i64>, Option<String>)> {
        match &self.customer {
            CustomerChoice::WalkIn => Ok((None, None)),
            CustomerChoice::WalkInNamed(name) => Ok((None, Some(name.clone()))),
            CustomerChoice::Existing { id, name } => Ok((Some(*id), Some(name.clone()))),
            CustomerChoice::New(form) => {
                if let Some(id) = self.created_customer_id {
                    // Created by an earlier attempt of this same checkout
                    warn!(customer_id = id, "Reusing customer from failed checkout");
                    return Ok((Some(id), Some(form.name.clone())));
                }
                validate_party_form(form).map_err(CoreError::from)?;
                let customer = self.client.customers().create(form).await?;
                self.created_customer_id = Some(customer.id);
                Ok((Some(customer.id), Some(customer.name)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdminError;
    use kirana_client::TokenStore;
    use kirana_core::money::Money;

    fn page() -> PosPage {
        let client = ApiClient::new("http://localhost:9", TokenStore::in_memory()).unwrap();
        PosPage::new(client, 400)
    }

    fn item(id: i64, qty: i64) -> InventoryItem {
        InventoryItem {
            id,
            name: format!("Item {}", id),
            sku: format!("SKU-{}", id),
            category: None,
            material: None,
            quantity: qty,
            cost_price: Money::from_rupees(40),
            selling_price: Money::from_rupees(60),
            min_stock_level: 2,
        }
    }

    #[test]
    fn test_add_to_cart_caps_at_fetched_stock() {
        let mut pos = page();
        pos.items = vec![item(1, 3)];

        pos.add_to_cart(1, 2).unwrap();
        let err = pos.add_to_cart(1, 2); // 2 + 2 > 3 on hand
        assert!(matches!(
            err,
            Err(AdminError::Core(CoreError::InsufficientStock { .. }))
        ));
        assert_eq!(pos.cart.quantity_of(1), 2);
    }

    #[test]
    fn test_sellable_excludes_zero_stock() {
        let mut pos = page();
        pos.items = vec![item(1, 0), item(2, 5)];
        let offered = pos.sellable();
        assert_eq!(offered.len(), 1);
        assert_eq!(offered[0].id, 2);
    }

    #[test]
    fn test_add_unknown_item_rejected() {
        let mut pos = page();
        assert!(pos.add_to_cart(99, 1).is_err());
    }

    #[test]
    fn test_choosing_another_customer_forgets_created_id() {
        let mut pos = page();
        pos.created_customer_id = Some(42);
        pos.choose_customer(CustomerChoice::WalkIn);
        assert!(pos.created_customer_id.is_none());
    }

    #[test]
    fn test_stage_starts_idle_and_moves_to_building() {
        let mut pos = page();
        assert_eq!(pos.stage(), CheckoutStage::Idle);
        pos.items = vec![item(1, 3)];
        pos.add_to_cart(1, 1).unwrap();
        assert_eq!(pos.stage(), CheckoutStage::Building);
    }

    #[tokio::test]
    async fn test_failed_checkout_lands_in_failed_stage() {
        // Port 9 refuses connections, so the sale post cannot succeed.
        let mut pos = page();
        pos.items = vec![item(1, 3)];
        pos.add_to_cart(1, 1).unwrap();
        assert!(pos.checkout().await.is_err());
        assert_eq!(pos.stage(), CheckoutStage::Failed);
        assert_eq!(pos.cart.quantity_of(1), 1);
    }

    #[tokio::test]
    async fn test_walk_in_resolves_without_network() {
        let mut pos = page();
        pos.customer = CustomerChoice::WalkInNamed("Ad-hoc buyer".into());
        let (id, name) = pos.resolve_customer().await.unwrap();
        assert_eq!(id, None);
        assert_eq!(name.as_deref(), Some("Ad-hoc buyer"));
    }
}
