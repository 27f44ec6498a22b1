//! Customer endpoints: CRUD, ledger mutations, purchase recommendations.
//!
//! Ledger mutations are posted through [`LedgerAction`], so callers decide
//! between "record a payment" and "record new dues" by name. The backend's
//! signed-amount wire convention is produced at the last moment, inside
//! [`LedgerAction::signed_amount`].

use kirana_core::ledger::LedgerAction;
use kirana_core::types::{Customer, LedgerReceipt, PartyForm, Recommendation};
use tracing::info;

use crate::error::ApiResult;
use crate::http::ApiClient;

pub struct CustomersApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn customers(&self) -> CustomersApi<'_> {
        CustomersApi { client: self }
    }
}

impl CustomersApi<'_> {
    pub async fn list(&self, search: Option<&str>) -> ApiResult<Vec<Customer>> {
        let mut builder = self.client.get("/customers/");
        if let Some(term) = search {
            builder = builder.query(&[("search", term)]);
        }
        self.client.send_json(builder).await
    }

    pub async fn get(&self, id: i64) -> ApiResult<Customer> {
        self.client
            .send_json(self.client.get(&format!("/customers/{}", id)))
            .await
    }

    pub async fn create(&self, form: &PartyForm) -> ApiResult<Customer> {
        self.client
            .send_json(self.client.post("/customers/").json(form))
            .await
    }

    pub async fn update(&self, id: i64, form: &PartyForm) -> ApiResult<Customer> {
        self.client
            .send_json(self.client.put(&format!("/customers/{}", id)).json(form))
            .await
    }

    /// Posts a planned ledger mutation. The backend acknowledges with a
    /// message and the new balance; callers re-fetch for the full row.
    pub async fn apply_ledger(&self, id: i64, action: LedgerAction) -> ApiResult<LedgerReceipt> {
        let amount = action.signed_amount().as_rupees_f64();
        info!(customer_id = id, ?action, "Posting customer ledger action");
        self.client
            .send_json(
                self.client
                    .post(&format!("/customers/{}/payments", id))
                    .query(&[("amount", amount)]),
            )
            .await
    }

    /// Items this customer buys most often, for the POS quick-add strip.
    pub async fn recommendations(&self, id: i64) -> ApiResult<Vec<Recommendation>> {
        self.client
            .send_json(self.client.get(&format!("/customers/{}/recommendations", id)))
            .await
    }
}
