//! Inventory endpoints.

use kirana_core::types::{InventoryItem, ItemForm, TopSeller};

use crate::error::ApiResult;
use crate::http::ApiClient;

pub struct InventoryApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn inventory(&self) -> InventoryApi<'_> {
        InventoryApi { client: self }
    }
}

impl InventoryApi<'_> {
    /// Lists items, optionally filtered server-side by a search term
    /// matching name or SKU.
    pub async fn list(&self, search: Option<&str>) -> ApiResult<Vec<InventoryItem>> {
        let mut builder = self.client.get("/inventory/");
        if let Some(term) = search {
            builder = builder.query(&[("search", term)]);
        }
        self.client.send_json(builder).await
    }

    pub async fn get(&self, id: i64) -> ApiResult<InventoryItem> {
        self.client
            .send_json(self.client.get(&format!("/inventory/{}", id)))
            .await
    }

    pub async fn create(&self, form: &ItemForm) -> ApiResult<InventoryItem> {
        self.client
            .send_json(self.client.post("/inventory/").json(form))
            .await
    }

    pub async fn update(&self, id: i64, form: &ItemForm) -> ApiResult<InventoryItem> {
        self.client
            .send_json(self.client.put(&format!("/inventory/{}", id)).json(form))
            .await
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.client
            .send_ok(self.client.delete(&format!("/inventory/{}", id)))
            .await
    }

    /// Items ranked by units sold, for the POS quick-add strip.
    pub async fn top_sellers(&self, limit: u32) -> ApiResult<Vec<TopSeller>> {
        self.client
            .send_json(
                self.client
                    .get("/inventory/top-sellers/")
                    .query(&[("limit", limit)]),
            )
            .await
    }
}
