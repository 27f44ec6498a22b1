//! Purchase endpoints: recording stock-in, document payments, deletion.

use kirana_core::money::Money;
use kirana_core::types::{Purchase, PurchaseDraft, PurchasePaymentReceipt, PurchaseUpdate};
use tracing::info;

use crate::error::ApiResult;
use crate::http::ApiClient;

pub struct PurchasesApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn purchases(&self) -> PurchasesApi<'_> {
        PurchasesApi { client: self }
    }
}

impl PurchasesApi<'_> {
    /// Lists purchases, optionally filtered server-side by vendor.
    pub async fn list(&self, vendor_id: Option<i64>) -> ApiResult<Vec<Purchase>> {
        let mut builder = self.client.get("/purchases/");
        if let Some(id) = vendor_id {
            builder = builder.query(&[("vendor_id", id)]);
        }
        self.client.send_json(builder).await
    }

    /// Records a purchase; the backend increments stock for each line.
    pub async fn create(&self, draft: &PurchaseDraft) -> ApiResult<Purchase> {
        let purchase: Purchase = self
            .client
            .send_json(self.client.post("/purchases/").json(draft))
            .await?;
        info!(
            purchase_id = purchase.id,
            vendor_id = purchase.vendor_id,
            total = %purchase.total_amount,
            "Purchase recorded"
        );
        Ok(purchase)
    }

    pub async fn update(&self, id: i64, update: &PurchaseUpdate) -> ApiResult<Purchase> {
        self.client
            .send_json(self.client.put(&format!("/purchases/{}", id)).json(update))
            .await
    }

    /// Posts a payment against the purchase. `amount` comes from
    /// [`plan_document_payment`](kirana_core::ledger::plan_document_payment).
    /// The backend acknowledges with a message plus the new paid totals.
    pub async fn pay(&self, id: i64, amount: Money) -> ApiResult<PurchasePaymentReceipt> {
        self.client
            .send_json(
                self.client
                    .post(&format!("/purchases/{}/pay", id))
                    .query(&[("amount", amount.as_rupees_f64())]),
            )
            .await
    }

    /// Reverts the purchase to fully unpaid.
    pub async fn unpay(&self, id: i64) -> ApiResult<()> {
        self.client
            .send_ok(self.client.post(&format!("/purchases/{}/unpay", id)))
            .await
    }

    /// Deletes a purchase. `revert_stock` controls whether the stock the
    /// purchase added is subtracted back out.
    pub async fn delete(&self, id: i64, revert_stock: bool) -> ApiResult<()> {
        self.client
            .send_ok(
                self.client
                    .delete(&format!("/purchases/{}", id))
                    .query(&[("revert_stock", revert_stock)]),
            )
            .await
    }
}
