//! Vendors page. Same shape as the customers page; no recommendations,
//! balances mean "we owe them" instead.

use kirana_client::transfer::DataKind;
use kirana_client::{ApiClient, ImportReport};
use kirana_core::ledger::{plan_party_payment, PaymentMode};
use kirana_core::listview::{matches_search, SortState};
use kirana_core::money::Money;
use kirana_core::types::{LedgerReceipt, PartyForm, Vendor};
use kirana_core::validation::validate_party_form;
use std::cmp::Ordering;
use tracing::info;

use crate::error::{AdminError, AdminResult};
use crate::fetch::{Debouncer, Ticket};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VendorColumn {
    Name,
    Mobile,
    Balance,
}

fn compare(a: &Vendor, b: &Vendor, key: VendorColumn) -> Ordering {
    match key {
        VendorColumn::Name => a.name.cmp(&b.name),
        VendorColumn::Mobile => a.mobile.cmp(&b.mobile),
        VendorColumn::Balance => a.current_balance.cmp(&b.current_balance),
    }
}

pub struct VendorsPage {
    client: ApiClient,
    vendors: Vec<Vendor>,
    pub search: String,
    pub sort: SortState<VendorColumn>,
    pub payables_only: bool,
    debouncer: Debouncer,
}

impl VendorsPage {
    pub fn new(client: ApiClient, debounce_ms: u64) -> Self {
        VendorsPage {
            client,
            vendors: Vec::new(),
            search: String::new(),
            sort: SortState::new(VendorColumn::Name),
            payables_only: false,
            debouncer: Debouncer::from_millis(debounce_ms),
        }
    }

    pub fn vendors(&self) -> &[Vendor] {
        &self.vendors
    }

    pub fn find(&self, id: i64) -> Option<&Vendor> {
        self.vendors.iter().find(|v| v.id == id)
    }

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
        let vendors = self.client.vendors().list(term).await?;
        if ticket.is_current() {
            self.vendors = vendors;
        }
        Ok(())
    }

    pub fn visible(&self) -> Vec<Vendor> {
        let mut rows: Vec<Vendor> = self
            .vendors
            .iter()
            .filter(|v| !self.payables_only || v.has_dues())
            .filter(|v| {
                matches_search(
                    &self.search,
                    &[&v.name, v.mobile.as_deref().unwrap_or("")],
                )
            })
            .cloned()
            .collect();
        self.sort.sort_slice(&mut rows, compare);
        rows
    }

    /// Total we owe across all fetched vendors.
    pub fn total_payables(&self) -> Money {
        self.vendors
            .iter()
            .filter(|v| v.has_dues())
            .map(|v| v.current_balance.abs())
            .sum()
    }

    pub async fn create_vendor(&mut self, form: &PartyForm) -> AdminResult<Vendor> {
        validate_party_form(form).map_err(kirana_core::error::CoreError::from)?;
        let vendor = self.client.vendors().create(form).await?;
        info!(vendor_id = vendor.id, name = %vendor.name, "Vendor created");
        self.refresh().await?;
        Ok(vendor)
    }

    pub async fn update_vendor(&mut self, id: i64, form: &PartyForm) -> AdminResult<Vendor> {
        validate_party_form(form).map_err(kirana_core::error::CoreError::from)?;
        let vendor = self.client.vendors().update(id, form).await?;
        self.refresh().await?;
        Ok(vendor)
    }

    pub async fn delete_vendor(&mut self, id: i64) -> AdminResult<()> {
        self.client.vendors().delete(id).await?;
        info!(vendor_id = id, "Vendor deleted");
        self.refresh().await
    }

    /// Row drill-down: every purchase recorded against this vendor.
    pub async fn purchase_history(&self, id: i64) -> AdminResult<Vec<kirana_core::types::Purchase>> {
        Ok(self.client.vendors().purchases(id).await?)
    }

    /// Applies a payment-modal choice against the vendor's current balance.
    pub async fn apply_payment(&mut self, id: i64, mode: PaymentMode) -> AdminResult<LedgerReceipt> {
        let balance = self
            .find(id)
            .map(|v| v.current_balance)
            .ok_or(AdminError::NotFetched { entity: "vendor", id })?;

        let action = plan_party_payment(balance, mode)?;
        let receipt = self.client.vendors().apply_ledger(id, action).await?;
        self.refresh().await?;
        Ok(receipt)
    }

    pub async fn import(&mut self, file_name: &str, data: Vec<u8>) -> AdminResult<ImportReport> {
        let report = self
            .client
            .transfer()
            .import(DataKind::Vendors, file_name, data, None)
            .await?;
        self.refresh().await?;
        Ok(report)
    }

    pub async fn export(&self) -> AdminResult<Vec<u8>> {
        Ok(self.client.transfer().export(DataKind::Vendors).await?)
    }
}
