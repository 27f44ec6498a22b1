//! Purchases page: recording stock-in from vendors and settling the
//! resulting documents.

use kirana_client::ApiClient;
use kirana_core::ledger::{plan_document_payment, PaymentMode};
use kirana_core::listview::SortState;
use kirana_core::money::Money;
use kirana_core::types::{
    PaymentStatus, Purchase, PurchaseDraft, PurchaseLine, PurchasePaymentReceipt, PurchaseUpdate,
};
use std::cmp::Ordering;
use tracing::info;

use crate::error::{AdminError, AdminResult};
use crate::fetch::{Debouncer, Ticket};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseColumn {
    Date,
    Vendor,
    Total,
    Remaining,
    Status,
}

fn compare(a: &Purchase, b: &Purchase, key: PurchaseColumn) -> Ordering {
    match key {
        PurchaseColumn::Date => a.timestamp.cmp(&b.timestamp),
        PurchaseColumn::Vendor => a.vendor_name.cmp(&b.vendor_name),
        PurchaseColumn::Total => a.total_amount.cmp(&b.total_amount),
        PurchaseColumn::Remaining => a.remaining().cmp(&b.remaining()),
        PurchaseColumn::Status => a.payment_status.to_string().cmp(&b.payment_status.to_string()),
    }
}

/// A purchase being composed, before it is posted.
#[derive(Debug, Default)]
pub struct PurchaseForm {
    pub vendor_id: Option<i64>,
    pub invoice_number: Option<String>,
    pub payment_status: PaymentStatus,
    pub lines: Vec<PurchaseLine>,
}

impl PurchaseForm {
    pub fn add_line(&mut self, item_id: i64, item_name: Option<String>, quantity: i64, unit_cost: Money) {
        self.lines.push(PurchaseLine {
            item_id,
            item_name,
            quantity,
            unit_cost,
        });
    }

    pub fn total(&self) -> Money {
        self.lines
            .iter()
            .map(|l| l.unit_cost.multiply_quantity(l.quantity))
            .sum()
    }

    fn into_draft(self) -> AdminResult<PurchaseDraft> {
        let vendor_id = self.vendor_id.ok_or(AdminError::Core(
            kirana_core::error::ValidationError::Required {
                field: "vendor".to_string(),
            }
            .into(),
        ))?;
        if self.lines.is_empty() {
            return Err(AdminError::Core(kirana_core::error::CoreError::EmptyCart));
        }
        Ok(PurchaseDraft {
            vendor_id,
            invoice_number: self.invoice_number,
            payment_status: self.payment_status,
            items: self.lines,
        })
    }
}

pub struct PurchasesPage {
    client: ApiClient,
    purchases: Vec<Purchase>,
    pub sort: SortState<PurchaseColumn>,
    pub unpaid_only: bool,
    /// Server-side vendor filter; `None` lists everything.
    pub vendor_filter: Option<i64>,
    debouncer: Debouncer,
}

impl PurchasesPage {
    pub fn new(client: ApiClient, debounce_ms: u64) -> Self {
        PurchasesPage {
            client,
            purchases: Vec::new(),
            sort: SortState::new(PurchaseColumn::Date),
            unpaid_only: false,
            vendor_filter: None,
            debouncer: Debouncer::from_millis(debounce_ms),
        }
    }

    pub fn purchases(&self) -> &[Purchase] {
        &self.purchases
    }

    pub fn find(&self, id: i64) -> Option<&Purchase> {
        self.purchases.iter().find(|p| p.id == id)
    }

    pub async fn refresh(&mut self) -> AdminResult<()> {
        let ticket: Ticket = self.debouncer.immediate();
        let purchases = self.client.purchases().list(self.vendor_filter).await?;
        if ticket.is_current() {
            self.purchases = purchases;
        }
        Ok(())
    }

    pub fn visible(&self) -> Vec<Purchase> {
        let mut rows: Vec<Purchase> = self
            .purchases
            .iter()
            .filter(|p| !self.unpaid_only || p.payment_status.has_outstanding())
            .cloned()
            .collect();
        self.sort.sort_slice(&mut rows, compare);
        rows
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Posts a composed purchase; the backend adds the stock.
    pub async fn record(&mut self, form: PurchaseForm) -> AdminResult<Purchase> {
        let draft = form.into_draft()?;
        let purchase = self.client.purchases().create(&draft).await?;
        self.refresh().await?;
        Ok(purchase)
    }

    pub async fn edit(&mut self, id: i64, update: &PurchaseUpdate) -> AdminResult<Purchase> {
        let purchase = self.client.purchases().update(id, update).await?;
        self.refresh().await?;
        Ok(purchase)
    }

    /// The spreadsheet template for bulk purchase entry.
    pub async fn entry_template(&self) -> AdminResult<Vec<u8>> {
        Ok(self.client.transfer().purchase_template().await?)
    }

    /// Applies a payment-modal choice against the purchase document.
    pub async fn apply_payment(
        &mut self,
        id: i64,
        mode: PaymentMode,
    ) -> AdminResult<PurchasePaymentReceipt> {
        let (total, paid) = self
            .find(id)
            .map(|p| (p.total_amount, p.paid_amount))
            .ok_or(AdminError::NotFetched { entity: "purchase", id })?;

        let amount = plan_document_payment(total, paid, mode)?;
        let receipt = self.client.purchases().pay(id, amount).await?;
        self.refresh().await?;
        Ok(receipt)
    }

    pub async fn mark_unpaid(&mut self, id: i64) -> AdminResult<()> {
        self.client.purchases().unpay(id).await?;
        self.refresh().await
    }

    /// Deletes a purchase; `revert_stock` also subtracts the stock it added.
    pub async fn delete(&mut self, id: i64, revert_stock: bool) -> AdminResult<()> {
        self.client.purchases().delete(id, revert_stock).await?;
        info!(purchase_id = id, revert_stock, "Purchase deleted");
        self.refresh().await
    }
}
