//! Sales endpoints: checkout, history queries, edits, document payments.

use chrono::NaiveDate;
use kirana_core::money::Money;
use kirana_core::types::{Sale, SaleDraft, SaleUpdate};
use serde::Serialize;
use tracing::info;

use crate::error::ApiResult;
use crate::http::ApiClient;

/// Server-side filters for the sales history list. All fields optional;
/// unset fields are left off the query string entirely.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SaleFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

#[derive(Serialize)]
struct PayBody {
    amount: Money,
}

pub struct SalesApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn sales(&self) -> SalesApi<'_> {
        SalesApi { client: self }
    }
}

impl SalesApi<'_> {
    pub async fn list(&self, filters: &SaleFilters) -> ApiResult<Vec<Sale>> {
        self.client
            .send_json(self.client.get("/sales/").query(filters))
            .await
    }

    /// Records a checkout. Stock is decremented server-side; an oversell
    /// that slipped past the client-side cap comes back as a 400.
    pub async fn create(&self, draft: &SaleDraft) -> ApiResult<Sale> {
        let sale: Sale = self
            .client
            .send_json(self.client.post("/sales/").json(draft))
            .await?;
        info!(
            sale_id = sale.id,
            total = %sale.total_amount,
            status = %sale.payment_status,
            "Sale recorded"
        );
        Ok(sale)
    }

    /// Distinct customer names across all sales, for the filter dropdown.
    pub async fn customer_names(&self) -> ApiResult<Vec<String>> {
        self.client.send_json(self.client.get("/sales/customers")).await
    }

    pub async fn update(&self, id: i64, update: &SaleUpdate) -> ApiResult<Sale> {
        self.client
            .send_json(self.client.put(&format!("/sales/{}", id)).json(update))
            .await
    }

    /// Deletes a sale and restores the stock it consumed.
    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.client
            .send_ok(self.client.delete(&format!("/sales/{}", id)))
            .await
    }

    /// Posts a payment against the sale. `amount` must already be planned
    /// through [`plan_document_payment`](kirana_core::ledger::plan_document_payment).
    /// Message-only acknowledgement; callers re-fetch for the updated sale.
    pub async fn pay(&self, id: i64, amount: Money) -> ApiResult<()> {
        self.client
            .send_ok(
                self.client
                    .post(&format!("/sales/{}/pay", id))
                    .json(&PayBody { amount }),
            )
            .await
    }

    /// Reverts the sale to fully unpaid ("Due").
    pub async fn unpay(&self, id: i64) -> ApiResult<()> {
        self.client
            .send_ok(self.client.post(&format!("/sales/{}/unpay", id)))
            .await
    }
}
