//! Inventory page: the stock table with search, column sorting, the
//! low-stock filter, item CRUD, and bulk import/export.

use kirana_client::transfer::DataKind;
use kirana_client::{ApiClient, ImportReport};
use kirana_core::listview::{matches_search, SortState};
use kirana_core::types::{InventoryItem, ItemForm};
use kirana_core::validation::validate_item_form;
use std::cmp::Ordering;
use tracing::info;

use crate::error::AdminResult;
use crate::fetch::{Debouncer, Ticket};

/// Sortable columns of the stock table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryColumn {
    Name,
    Sku,
    Quantity,
    CostPrice,
    SellingPrice,
    StockValue,
}

fn compare(a: &InventoryItem, b: &InventoryItem, key: InventoryColumn) -> Ordering {
    match key {
        InventoryColumn::Name => a.name.cmp(&b.name),
        InventoryColumn::Sku => a.sku.cmp(&b.sku),
        InventoryColumn::Quantity => a.quantity.cmp(&b.quantity),
        InventoryColumn::CostPrice => a.cost_price.cmp(&b.cost_price),
        InventoryColumn::SellingPrice => a.selling_price.cmp(&b.selling_price),
        InventoryColumn::StockValue => a.stock_value().cmp(&b.stock_value()),
    }
}

pub struct InventoryPage {
    client: ApiClient,
    items: Vec<InventoryItem>,
    pub search: String,
    pub sort: SortState<InventoryColumn>,
    pub low_stock_only: bool,
    debouncer: Debouncer,
}

impl InventoryPage {
    pub fn new(client: ApiClient, debounce_ms: u64) -> Self {
        InventoryPage {
            client,
            items: Vec::new(),
            search: String::new(),
            sort: SortState::new(InventoryColumn::Name),
            low_stock_only: false,
            debouncer: Debouncer::from_millis(debounce_ms),
        }
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    // =========================================================================
    // Fetching
    // =========================================================================

    /// Immediate fetch: page open and post-mutation refreshes.
    pub async fn refresh(&mut self) -> AdminResult<()> {
        let ticket = self.debouncer.immediate();
        self.fetch(ticket).await
    }

    /// Search-keystroke fetch. Waits out the debounce window; superseded
    /// keystrokes fetch nothing.
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
        let items = self.client.inventory().list(term).await?;
        // A newer fetch may have started while this one was in flight
        if ticket.is_current() {
            self.items = items;
        }
        Ok(())
    }

    // =========================================================================
    // Derived View
    // =========================================================================

    /// The rows the stock table shows, after the low-stock filter, the
    /// local search refinement, and the configured sort.
    pub fn visible(&self) -> Vec<InventoryItem> {
        let mut rows: Vec<InventoryItem> = self
            .items
            .iter()
            .filter(|i| !self.low_stock_only || i.is_low_stock())
            .filter(|i| matches_search(&self.search, &[&i.name, &i.sku]))
            .cloned()
            .collect();
        self.sort.sort_slice(&mut rows, compare);
        rows
    }

    pub fn low_stock_count(&self) -> usize {
        self.items.iter().filter(|i| i.is_low_stock()).count()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    pub async fn create_item(&mut self, form: &ItemForm) -> AdminResult<InventoryItem> {
        validate_item_form(form).map_err(kirana_core::error::CoreError::from)?;
        let item = self.client.inventory().create(form).await?;
        info!(item_id = item.id, name = %item.name, "Item created");
        self.refresh().await?;
        Ok(item)
    }

    pub async fn update_item(&mut self, id: i64, form: &ItemForm) -> AdminResult<InventoryItem> {
        validate_item_form(form).map_err(kirana_core::error::CoreError::from)?;
        let item = self.client.inventory().update(id, form).await?;
        self.refresh().await?;
        Ok(item)
    }

    pub async fn delete_item(&mut self, id: i64) -> AdminResult<()> {
        self.client.inventory().delete(id).await?;
        info!(item_id = id, "Item deleted");
        self.refresh().await
    }

    // =========================================================================
    // Bulk Transfer
    // =========================================================================

    pub async fn import(&mut self, file_name: &str, data: Vec<u8>) -> AdminResult<ImportReport> {
        let report = self
            .client
            .transfer()
            .import(DataKind::Inventory, file_name, data, None)
            .await?;
        self.refresh().await?;
        Ok(report)
    }

    pub async fn export(&self) -> AdminResult<Vec<u8>> {
        Ok(self.client.transfer().export(DataKind::Inventory).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kirana_client::TokenStore;
    use kirana_core::money::Money;

    fn item(id: i64, name: &str, qty: i64, min: i64) -> InventoryItem {
        InventoryItem {
            id,
            name: name.to_string(),
            sku: format!("SKU-{}", id),
            category: None,
            material: None,
            quantity: qty,
            cost_price: Money::from_rupees(50),
            selling_price: Money::from_rupees(80),
            min_stock_level: min,
        }
    }

    fn page_with(items: Vec<InventoryItem>) -> InventoryPage {
        let client = ApiClient::new("http://localhost:9", TokenStore::in_memory()).unwrap();
        let mut page = InventoryPage::new(client, 400);
        page.items = items;
        page
    }

    #[test]
    fn test_low_stock_filter() {
        let mut page = page_with(vec![item(1, "Tiffin", 2, 5), item(2, "Thali", 50, 5)]);
        assert_eq!(page.visible().len(), 2);

        page.low_stock_only = true;
        let rows = page.visible();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Tiffin");
        assert_eq!(page.low_stock_count(), 1);
    }

    #[test]
    fn test_sort_by_quantity_descending() {
        let mut page = page_with(vec![
            item(1, "A", 10, 2),
            item(2, "B", 30, 2),
            item(3, "C", 20, 2),
        ]);
        page.sort = SortState::new(InventoryColumn::Quantity);
        page.sort.toggle(InventoryColumn::Quantity);

        let quantities: Vec<i64> = page.visible().iter().map(|i| i.quantity).collect();
        assert_eq!(quantities, vec![30, 20, 10]);
    }

    #[test]
    fn test_local_search_refines_fetched_rows() {
        let mut page = page_with(vec![item(1, "Steel Tiffin", 5, 2), item(2, "Brass Thali", 5, 2)]);
        page.search = "tiffin".to_string();
        let rows = page.visible();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Steel Tiffin");
    }
}
