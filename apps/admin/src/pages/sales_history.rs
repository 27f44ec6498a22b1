//! Sales history page: querying recorded sales and settling their balances.
//!
//! Filtering here is server-side: date window, customer, and invoice
//! number all travel as query parameters, and the page shows exactly what
//! the backend returned. Only sorting stays local.

use chrono::{Local, NaiveDateTime};
use kirana_client::transfer::DataKind;
use kirana_client::{ApiClient, ImportReport, SaleFilters};
use kirana_core::daterange::RangePreset;
use kirana_core::ledger::{plan_document_payment, PaymentMode};
use kirana_core::listview::SortState;
use kirana_core::money::Money;
use kirana_core::types::{PaymentStatus, Sale, SaleUpdate};
use std::cmp::Ordering;
use tracing::info;

use crate::error::{AdminError, AdminResult};
use crate::fetch::{Debouncer, Ticket};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaleColumn {
    Date,
    Customer,
    Total,
    Remaining,
    Status,
}

fn compare(a: &Sale, b: &Sale, key: SaleColumn) -> Ordering {
    match key {
        SaleColumn::Date => a.timestamp.cmp(&b.timestamp),
        SaleColumn::Customer => a.customer_name.cmp(&b.customer_name),
        SaleColumn::Total => a.total_amount.cmp(&b.total_amount),
        SaleColumn::Remaining => a.remaining().cmp(&b.remaining()),
        SaleColumn::Status => a.payment_status.to_string().cmp(&b.payment_status.to_string()),
    }
}

pub struct SalesHistoryPage {
    client: ApiClient,
    sales: Vec<Sale>,
    pub range: RangePreset,
    pub customer_filter: Option<i64>,
    pub customer_name_filter: Option<String>,
    pub invoice_filter: Option<String>,
    pub sort: SortState<SaleColumn>,
    debouncer: Debouncer,
}

impl SalesHistoryPage {
    pub fn new(client: ApiClient, debounce_ms: u64) -> Self {
        SalesHistoryPage {
            client,
            sales: Vec::new(),
            range: RangePreset::default(),
            customer_filter: None,
            customer_name_filter: None,
            invoice_filter: None,
            sort: SortState::new(SaleColumn::Date),
            debouncer: Debouncer::from_millis(debounce_ms),
        }
    }

    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    pub fn find(&self, id: i64) -> Option<&Sale> {
        self.sales.iter().find(|s| s.id == id)
    }

    fn filters(&self, now: NaiveDateTime) -> SaleFilters {
        let window = self.range.resolve(now);
        SaleFilters {
            customer_id: self.customer_filter,
            customer_name: self.customer_name_filter.clone(),
            invoice_number: self.invoice_filter.clone(),
            start_date: window.map(|(start, _)| start.date()),
            end_date: window.map(|(_, end)| end.date()),
        }
    }

    // =========================================================================
    // Fetching
    // =========================================================================

    pub async fn refresh(&mut self) -> AdminResult<()> {
        let ticket = self.debouncer.immediate();
        self.fetch(ticket).await
    }

    /// Filter-input fetch, debounced like a search box.
    pub async fn filters_changed(&mut self) -> AdminResult<()> {
        let Some(ticket) = self.debouncer.settle().await else {
            return Ok(());
        };
        self.fetch(ticket).await
    }

    async fn fetch(&mut self, ticket: Ticket) -> AdminResult<()> {
        let filters = self.filters(Local::now().naive_local());
        let sales = self.client.sales().list(&filters).await?;
        if ticket.is_current() {
            self.sales = sales;
        }
        Ok(())
    }

    /// Distinct customer names for the filter dropdown.
    pub async fn customer_name_options(&self) -> AdminResult<Vec<String>> {
        Ok(self.client.sales().customer_names().await?)
    }

    // =========================================================================
    // Derived View
    // =========================================================================

    pub fn visible(&self) -> Vec<Sale> {
        let mut rows = self.sales.clone();
        self.sort.sort_slice(&mut rows, compare);
        rows
    }

    /// Revenue across the fetched window.
    pub fn total_amount(&self) -> Money {
        self.sales.iter().map(|s| s.total_amount).sum()
    }

    /// Unpaid remainder across the fetched window.
    pub fn total_outstanding(&self) -> Money {
        self.sales.iter().map(|s| s.remaining()).sum()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    pub async fn edit(&mut self, id: i64, update: &SaleUpdate) -> AdminResult<Sale> {
        let sale = self.client.sales().update(id, update).await?;
        self.refresh().await?;
        Ok(sale)
    }

    /// Applies a payment-modal choice against the sale document. The backend
    /// answers with a bare acknowledgement; the follow-up refresh picks up
    /// the new paid totals.
    pub async fn apply_payment(&mut self, id: i64, mode: PaymentMode) -> AdminResult<()> {
        let (total, paid) = self
            .find(id)
            .map(|s| (s.total_amount, s.paid_amount))
            .ok_or(AdminError::NotFetched { entity: "sale", id })?;

        let amount = plan_document_payment(total, paid, mode)?;
        self.client.sales().pay(id, amount).await?;
        self.refresh().await
    }

    pub async fn mark_unpaid(&mut self, id: i64) -> AdminResult<()> {
        self.client.sales().unpay(id).await?;
        self.refresh().await
    }

    /// Deletes a sale; the backend restores the stock it consumed.
    pub async fn delete(&mut self, id: i64) -> AdminResult<()> {
        self.client.sales().delete(id).await?;
        info!(sale_id = id, "Sale deleted, stock restored");
        self.refresh().await
    }

    // =========================================================================
    // Bulk Transfer
    // =========================================================================

    /// Bulk sales import. Every imported row is stamped with the chosen
    /// payment status.
    pub async fn import(
        &mut self,
        file_name: &str,
        data: Vec<u8>,
        status: PaymentStatus,
    ) -> AdminResult<ImportReport> {
        let status_label = status.to_string();
        let report = self
            .client
            .transfer()
            .import(DataKind::Sales, file_name, data, Some(&status_label))
            .await?;
        self.refresh().await?;
        Ok(report)
    }

    pub async fn export(&self) -> AdminResult<Vec<u8>> {
        Ok(self.client.transfer().export(DataKind::Sales).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use kirana_client::TokenStore;

    fn sale(id: i64, total: i64, paid: i64) -> Sale {
        Sale {
            id,
            timestamp: NaiveDate::from_ymd_opt(2026, 2, 10)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            customer_id: None,
            customer_name: Some("Walk-in".into()),
            payment_status: if paid >= total {
                PaymentStatus::Paid
            } else if paid > 0 {
                PaymentStatus::PartiallyPaid
            } else {
                PaymentStatus::Due
            },
            paid_amount: Money::from_rupees(paid),
            total_amount: Money::from_rupees(total),
            total_profit: Money::zero(),
            invoice_number: None,
            tax_amount: Money::zero(),
            items: vec![],
        }
    }

    fn page_with(sales: Vec<Sale>) -> SalesHistoryPage {
        let client = ApiClient::new("http://localhost:9", TokenStore::in_memory()).unwrap();
        let mut page = SalesHistoryPage::new(client, 400);
        page.sales = sales;
        page
    }

    #[test]
    fn test_window_totals() {
        let page = page_with(vec![sale(1, 500, 300), sale(2, 200, 200), sale(3, 100, 0)]);
        assert_eq!(page.total_amount(), Money::from_rupees(800));
        assert_eq!(page.total_outstanding(), Money::from_rupees(300));
    }

    #[test]
    fn test_filters_resolve_date_window() {
        let mut page = page_with(vec![]);
        page.range = RangePreset::Custom {
            start: NaiveDate::from_ymd_opt(2026, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            end: NaiveDate::from_ymd_opt(2026, 1, 31)
                .unwrap()
                .and_hms_opt(23, 59, 59)
                .unwrap(),
        };
        page.invoice_filter = Some("INV-7".into());

        let now = NaiveDate::from_ymd_opt(2026, 2, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let filters = page.filters(now);
        assert_eq!(filters.start_date, NaiveDate::from_ymd_opt(2026, 1, 1));
        assert_eq!(filters.end_date, NaiveDate::from_ymd_opt(2026, 1, 31));
        assert_eq!(filters.invoice_number.as_deref(), Some("INV-7"));
    }

    #[test]
    fn test_all_time_sends_no_dates() {
        let mut page = page_with(vec![]);
        page.range = RangePreset::AllTime;
        let now = NaiveDate::from_ymd_opt(2026, 2, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let filters = page.filters(now);
        assert!(filters.start_date.is_none());
        assert!(filters.end_date.is_none());
    }
}
