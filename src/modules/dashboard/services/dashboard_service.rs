use std::sync::Arc;

use chrono::{DateTime, Datelike};
use chrono_tz::Tz;
use tracing::info;

use crate::core::{AppTimezone, Result};
use crate::modules::dashboard::models::{
    ChartFilter, ChartSeries, DashboardQuery, DashboardResponse, FilterEcho, MonthChoice,
    MONTH_NAMES,
};
use crate::modules::dashboard::repositories::DashboardRepository;
use crate::modules::dashboard::services::{aggregate, present_income, present_sales, resolve_window};

/// Which figure a chart plots
#[derive(Debug, Clone, Copy)]
enum Chart {
    Income,
    Sales,
}

/// Builds the dashboard for one tenant per request. Holds no state between
/// requests; every call re-reads the database.
pub struct DashboardService {
    repo: Arc<dyn DashboardRepository>,
    timezone: AppTimezone,
}

impl DashboardService {
    pub fn new(repo: Arc<dyn DashboardRepository>, timezone: AppTimezone) -> Self {
        Self { repo, timezone }
    }

    pub async fn dashboard(&self, tenant_id: i64, query: &DashboardQuery) -> Result<DashboardResponse> {
        self.dashboard_at(tenant_id, query, self.timezone.now()).await
    }

    /// Same as [`Self::dashboard`] with an explicit "now"
    pub async fn dashboard_at(
        &self,
        tenant_id: i64,
        query: &DashboardQuery,
        now: DateTime<Tz>,
    ) -> Result<DashboardResponse> {
        let settings = self.repo.app_settings().await?;
        let counts = self.repo.record_counts(tenant_id).await?;

        let income_filter = query.income();
        let sales_filter = query.sales();
        let income = self.chart(tenant_id, &income_filter, now, Chart::Income).await?;
        let sales = self.chart(tenant_id, &sales_filter, now, Chart::Sales).await?;

        info!(
            tenant_id,
            income_months = income.labels.len(),
            sales_months = sales.labels.len(),
            total_income = income.grand_total,
            total_sales = sales.grand_total,
            "Dashboard built"
        );

        Ok(DashboardResponse {
            counts,
            total_income: income.grand_total,
            total_sales: sales.grand_total,
            income,
            sales,
            chart_colors: settings.colors(),
            income_filter: echo(&income_filter, now),
            sales_filter: echo(&sales_filter, now),
            current_year: now.year(),
            year_choices: [now.year(), now.year() - 1],
            month_choices: month_choices(),
        })
    }

    async fn chart(
        &self,
        tenant_id: i64,
        filter: &ChartFilter,
        now: DateTime<Tz>,
        chart: Chart,
    ) -> Result<ChartSeries> {
        let window = resolve_window(filter, now);
        let transactions = self
            .repo
            .closed_transactions(tenant_id, window.start_utc(), window.end_utc())
            .await?;
        let buckets = aggregate(&window, filter.role_filter(), &transactions);

        Ok(match chart {
            Chart::Income => present_income(&window, &buckets),
            Chart::Sales => present_sales(&window, &buckets),
        })
    }
}

/// Submitted values with the same defaults the resolver applies
fn echo(filter: &ChartFilter, now: DateTime<Tz>) -> FilterEcho {
    FilterEcho {
        period: filter
            .period
            .clone()
            .unwrap_or_else(|| "this_year".to_string()),
        month: filter
            .month
            .clone()
            .unwrap_or_else(|| now.month().to_string()),
        year: filter.year.clone().unwrap_or_else(|| now.year().to_string()),
        from: filter.from.clone().unwrap_or_default(),
        to: filter.to.clone().unwrap_or_default(),
        roles: filter.role_filter().to_param(),
    }
}

fn month_choices() -> Vec<MonthChoice> {
    MONTH_NAMES
        .into_iter()
        .zip(1u32..)
        .map(|(name, value)| MonthChoice { value, name })
        .collect()
}
