//! Vendor endpoints. Mirrors the customer surface, plus deletion and the
//! purchase-history drill-down.

use kirana_core::ledger::LedgerAction;
use kirana_core::types::{LedgerReceipt, PartyForm, Purchase, Vendor};
use tracing::info;

use crate::error::ApiResult;
use crate::http::ApiClient;

pub struct VendorsApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn vendors(&self) -> VendorsApi<'_> {
        VendorsApi { client: self }
    }
}

impl VendorsApi<'_> {
    pub async fn list(&self, search: Option<&str>) -> ApiResult<Vec<Vendor>> {
        let mut builder = self.client.get("/vendors/");
        if let Some(term) = search {
            builder = builder.query(&[("search", term)]);
        }
        self.client.send_json(builder).await
    }

    pub async fn create(&self, form: &PartyForm) -> ApiResult<Vendor> {
        self.client
            .send_json(self.client.post("/vendors/").json(form))
            .await
    }

    pub async fn update(&self, id: i64, form: &PartyForm) -> ApiResult<Vendor> {
        self.client
            .send_json(self.client.put(&format!("/vendors/{}", id)).json(form))
            .await
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.client
            .send_ok(self.client.delete(&format!("/vendors/{}", id)))
            .await
    }

    /// All purchases recorded against this vendor (row drill-down).
    pub async fn purchases(&self, id: i64) -> ApiResult<Vec<Purchase>> {
        self.client
            .send_json(self.client.get(&format!("/vendors/{}/purchases", id)))
            .await
    }

    /// Posts a planned ledger mutation. The backend acknowledges with a
    /// message and the new balance; callers re-fetch for the full row.
    pub async fn apply_ledger(&self, id: i64, action: LedgerAction) -> ApiResult<LedgerReceipt> {
        let amount = action.signed_amount().as_rupees_f64();
        info!(vendor_id = id, ?action, "Posting vendor ledger action");
        self.client
            .send_json(
                self.client
                    .post(&format!("/vendors/{}/payments", id))
                    .query(&[("amount", amount)]),
            )
            .await
    }
}
