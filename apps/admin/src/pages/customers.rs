//! Customers page: the party ledger for buyers.
//!
//! Ledger mutations go through the planner in `kirana_core::ledger`, always
//! against the balance from the row as currently fetched. A settlement is
//! never computed from a cached modal value: the page re-reads the row at
//! confirm time, so an intervening change produces the right amount or a
//! clean "nothing outstanding" error.

use kirana_client::transfer::DataKind;
use kirana_client::{ApiClient, ImportReport};
use kirana_core::ledger::{plan_party_payment, PaymentMode};
use kirana_core::listview::{matches_search, SortState};
use kirana_core::money::Money;
use kirana_core::types::{Customer, LedgerReceipt, PartyForm, Recommendation};
use kirana_core::validation::validate_party_form;
use std::cmp::Ordering;
use tracing::info;

use crate::error::{AdminError, AdminResult};
use crate::fetch::{Debouncer, Ticket};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerColumn {
    Name,
    Mobile,
    Balance,
}

fn compare(a: &Customer, b: &Customer, key: CustomerColumn) -> Ordering {
    match key {
        CustomerColumn::Name => a.name.cmp(&b.name),
        CustomerColumn::Mobile => a.mobile.cmp(&b.mobile),
        CustomerColumn::Balance => a.current_balance.cmp(&b.current_balance),
    }
}

pub struct CustomersPage {
    client: ApiClient,
    customers: Vec<Customer>,
    pub search: String,
    pub sort: SortState<CustomerColumn>,
    pub dues_only: bool,
    debouncer: Debouncer,
}

impl CustomersPage {
    pub fn new(client: ApiClient, debounce_ms: u64) -> Self {
        CustomersPage {
            client,
            customers: Vec::new(),
            search: String::new(),
            sort: SortState::new(CustomerColumn::Name),
            dues_only: false,
            debouncer: Debouncer::from_millis(debounce_ms),
        }
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn find(&self, id: i64) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    // =========================================================================
    // Fetching
    // =========================================================================

    pub async fn refresh(&mut self) -> AdminResult<()> {
        let ticket = self.debouncer.immediate();
        self.fetch(ticket).await
    }

    pub async fn search_changed(&mut self, term: &str) -> AdminResult<()> {
        self.search = term.to_string();
        let Some(ticket) = self.debouncer.settle().await else {
            return Ok(());
        };
        self.fetch(ticket).await
    }

    async fn fetch(&mut self, ticket: Ticket) -> AdminResult<()> {
        let term = if self.search.trim().is_empty() {
            None
        } else {
            Some(self.search.as_str())
        };
        let customers = self.client.customers().list(term).await?;
        if ticket.is_current() {
            self.customers = customers;
        }
        Ok(())
    }

    // =========================================================================
    // Derived View
    // =========================================================================

    pub fn visible(&self) -> Vec<Customer> {
        let mut rows: Vec<Customer> = self
            .customers
            .iter()
            .filter(|c| !self.dues_only || c.has_dues())
            .filter(|c| {
                matches_search(
                    &self.search,
                    &[&c.name, c.mobile.as_deref().unwrap_or("")],
                )
            })
            .cloned()
            .collect();
        self.sort.sort_slice(&mut rows, compare);
        rows
    }

    /// Total outstanding dues across all fetched customers.
    pub fn total_dues(&self) -> Money {
        self.customers
            .iter()
            .filter(|c| c.has_dues())
            .map(|c| c.current_balance.abs())
            .sum()
    }

    // =========================================================================
    // CRUD
    // =========================================================================

    pub async fn create_customer(&mut self, form: &PartyForm) -> AdminResult<Customer> {
        validate_party_form(form).map_err(kirana_core::error::CoreError::from)?;
        let customer = self.client.customers().create(form).await?;
        info!(customer_id = customer.id, name = %customer.name, "Customer created");
        self.refresh().await?;
        Ok(customer)
    }

    pub async fn update_customer(&mut self, id: i64, form: &PartyForm) -> AdminResult<Customer> {
        validate_party_form(form).map_err(kirana_core::error::CoreError::from)?;
        let customer = self.client.customers().update(id, form).await?;
        self.refresh().await?;
        Ok(customer)
    }

    // =========================================================================
    // Ledger
    // =========================================================================

    /// Applies a payment-modal choice to a customer's ledger. The balance
    /// given to the planner is whatever the row holds right now.
    pub async fn apply_payment(&mut self, id: i64, mode: PaymentMode) -> AdminResult<LedgerReceipt> {
        let balance = self
            .find(id)
            .map(|c| c.current_balance)
            .ok_or(AdminError::NotFetched { entity: "customer", id })?;

        let action = plan_party_payment(balance, mode)?;
        let receipt = self.client.customers().apply_ledger(id, action).await?;
        self.refresh().await?;
        Ok(receipt)
    }

    pub async fn recommendations(&self, id: i64) -> AdminResult<Vec<Recommendation>> {
        Ok(self.client.customers().recommendations(id).await?)
    }

    /// Row drill-down: this customer's sales.
    pub async fn sales_history(&self, id: i64) -> AdminResult<Vec<kirana_core::types::Sale>> {
        let filters = kirana_client::SaleFilters {
            customer_id: Some(id),
            ..Default::default()
        };
        Ok(self.client.sales().list(&filters).await?)
    }

    // =========================================================================
    // Bulk Transfer
    // =========================================================================

    pub async fn import(&mut self, file_name: &str, data: Vec<u8>) -> AdminResult<ImportReport> {
        let report = self
            .client
            .transfer()
            .import(DataKind::Customers, file_name, data, None)
            .await?;
        self.refresh().await?;
        Ok(report)
    }

    pub async fn export(&self) -> AdminResult<Vec<u8>> {
        Ok(self.client.transfer().export(DataKind::Customers).await?)
    }
}
