//! Analytics and insights endpoints.
//!
//! All aggregation happens server-side. The client passes a resolved date
//! window and renders whatever comes back; there is no client-side recompute
//! of revenue or profit.

use chrono::NaiveDateTime;
use kirana_core::types::{DashboardStats, TrendPoint};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::http::ApiClient;

/// Narrative summary produced by the insights service.
#[derive(Debug, Clone, Deserialize)]
pub struct BusinessSummary {
    pub summary: String,
}

/// Answer to a free-form business question.
#[derive(Debug, Clone, Deserialize)]
pub struct InsightAnswer {
    pub response: String,
}

pub struct AnalyticsApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn analytics(&self) -> AnalyticsApi<'_> {
        AnalyticsApi { client: self }
    }
}

impl AnalyticsApi<'_> {
    /// Aggregate stats for the window. `None` means all time.
    pub async fn dashboard(
        &self,
        window: Option<(NaiveDateTime, NaiveDateTime)>,
    ) -> ApiResult<DashboardStats> {
        let mut builder = self.client.get("/analytics/dashboard");
        if let Some((start, end)) = window {
            builder = builder.query(&[("start_date", start), ("end_date", end)]);
        }
        self.client.send_json(builder).await
    }

    /// Daily sales/profit series for the window.
    pub async fn sales_trend(
        &self,
        window: Option<(NaiveDateTime, NaiveDateTime)>,
    ) -> ApiResult<Vec<TrendPoint>> {
        let mut builder = self.client.get("/analytics/sales_trend");
        if let Some((start, end)) = window {
            builder = builder.query(&[("start_date", start), ("end_date", end)]);
        }
        self.client.send_json(builder).await
    }

    pub async fn business_summary(&self) -> ApiResult<BusinessSummary> {
        self.client
            .send_json(self.client.get("/insights/business-summary"))
            .await
    }

    pub async fn ask(&self, query: &str) -> ApiResult<InsightAnswer> {
        self.client
            .send_json(self.client.post("/insights/chat").query(&[("query", query)]))
            .await
    }
}
