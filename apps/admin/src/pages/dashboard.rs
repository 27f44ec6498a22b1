//! Dashboard page: range-windowed aggregates and the sales trend.
//!
//! All numbers come from the analytics endpoints; the page resolves the
//! preset to concrete timestamps and renders whatever comes back. Stats
//! and the trend series are fetched in parallel, under one ticket so a
//! range change mid-flight discards both halves together.

use chrono::Local;
use kirana_client::analytics::BusinessSummary;
use kirana_client::ApiClient;
use kirana_core::daterange::RangePreset;
use kirana_core::money::Money;
use kirana_core::types::{DashboardStats, TrendPoint};
use tracing::warn;

use crate::error::AdminResult;
use crate::fetch::FetchSequence;

pub struct DashboardPage {
    client: ApiClient,
    pub range: RangePreset,
    stats: DashboardStats,
    trend: Vec<TrendPoint>,
    sequence: FetchSequence,
}

impl DashboardPage {
    pub fn new(client: ApiClient) -> Self {
        DashboardPage {
            client,
            range: RangePreset::default(),
            stats: DashboardStats::default(),
            trend: Vec::new(),
            sequence: FetchSequence::new(),
        }
    }

    pub fn stats(&self) -> &DashboardStats {
        &self.stats
    }

    pub fn trend(&self) -> &[TrendPoint] {
        &self.trend
    }

    /// Fetches stats and trend for the current range, in parallel.
    ///
    /// Each widget fails independently: a failed half is logged and its
    /// previous data kept, the other half still updates.
    pub async fn refresh(&mut self) -> AdminResult<()> {
        let ticket = self.sequence.begin();
        let window = self.range.resolve(Local::now().naive_local());

        let analytics = self.client.analytics();
        let (stats, trend) = tokio::join!(
            analytics.dashboard(window),
            analytics.sales_trend(window),
        );
        if !ticket.is_current() {
            return Ok(());
        }

        match stats {
            Ok(stats) => self.stats = stats,
            Err(e) => warn!(error = %e, "Dashboard stats fetch failed, keeping stale data"),
        }
        match trend {
            Ok(trend) => self.trend = trend,
            Err(e) => warn!(error = %e, "Sales trend fetch failed, keeping stale data"),
        }
        Ok(())
    }

    pub async fn set_range(&mut self, range: RangePreset) -> AdminResult<()> {
        self.range = range;
        self.refresh().await
    }

    /// The trend day with the highest takings, for the chart callout.
    pub fn best_day(&self) -> Option<&TrendPoint> {
        self.trend.iter().max_by_key(|p| p.amount)
    }

    /// Average daily takings over the fetched series.
    pub fn average_daily(&self) -> Money {
        if self.trend.is_empty() {
            return Money::zero();
        }
        let total: Money = self.trend.iter().map(|p| p.amount).sum();
        Money::from_paise(total.paise() / self.trend.len() as i64)
    }

    // =========================================================================
    // Insights
    // =========================================================================

    pub async fn business_summary(&self) -> AdminResult<BusinessSummary> {
        Ok(self.client.analytics().business_summary().await?)
    }

    pub async fn ask(&self, question: &str) -> AdminResult<String> {
        Ok(self.client.analytics().ask(question).await?.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use kirana_client::TokenStore;

    fn point(day: u32, amount: i64) -> TrendPoint {
        TrendPoint {
            date: NaiveDate::from_ymd_opt(2026, 3, day).unwrap(),
            amount: Money::from_rupees(amount),
            profit: Money::from_rupees(amount / 4),
        }
    }

    fn page_with(trend: Vec<TrendPoint>) -> DashboardPage {
        let client = ApiClient::new("http://localhost:9", TokenStore::in_memory()).unwrap();
        let mut page = DashboardPage::new(client);
        page.trend = trend;
        page
    }

    #[test]
    fn test_best_day_and_average() {
        let page = page_with(vec![point(1, 100), point(2, 700), point(3, 400)]);
        assert_eq!(
            page.best_day().unwrap().date,
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
        );
        assert_eq!(page.average_daily(), Money::from_rupees(400));
    }

    #[test]
    fn test_empty_trend_average_is_zero() {
        let page = page_with(vec![]);
        assert!(page.best_day().is_none());
        assert_eq!(page.average_daily(), Money::zero());
    }
}
