use serde::{Deserialize, Serialize};

use crate::modules::dashboard::models::ChartFilter;
use crate::modules::settings::ChartColors;

/// Query string of `GET /dashboard`: two independent chart filters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardQuery {
    pub income_period: Option<String>,
    pub income_year: Option<String>,
    pub income_month: Option<String>,
    pub income_from: Option<String>,
    pub income_to: Option<String>,
    pub income_roles: Option<String>,
    pub sales_period: Option<String>,
    pub sales_year: Option<String>,
    pub sales_month: Option<String>,
    pub sales_from: Option<String>,
    pub sales_to: Option<String>,
    pub sales_roles: Option<String>,
}

impl DashboardQuery {
    pub fn income(&self) -> ChartFilter {
        ChartFilter {
            period: self.income_period.clone(),
            year: self.income_year.clone(),
            month: self.income_month.clone(),
            from: self.income_from.clone(),
            to: self.income_to.clone(),
            roles: self.income_roles.clone(),
        }
    }

    pub fn sales(&self) -> ChartFilter {
        ChartFilter {
            period: self.sales_period.clone(),
            year: self.sales_year.clone(),
            month: self.sales_month.clone(),
            from: self.sales_from.clone(),
            to: self.sales_to.clone(),
            roles: self.sales_roles.clone(),
        }
    }
}

/// Chart-ready series. Every array lines up with `labels`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub total: Vec<f64>,
    pub buyer: Vec<f64>,
    pub seller: Vec<f64>,
    pub dual: Vec<f64>,
    pub count_buyer: Vec<u32>,
    pub count_seller: Vec<u32>,
    pub count_dual: Vec<u32>,
    pub grand_total: f64,
    /// `grand_total` as whole dollars, e.g. `$1,250,000`
    pub grand_total_display: String,
}

/// Headline record counts for the tenant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RecordCounts {
    pub clients: i64,
    pub properties: i64,
    /// Leads not yet converted to a client
    pub leads: i64,
    pub transactions: i64,
}

/// Submitted filter values, echoed so the client can redraw its controls
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterEcho {
    pub period: String,
    pub month: String,
    pub year: String,
    pub from: String,
    pub to: String,
    pub roles: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthChoice {
    pub value: u32,
    pub name: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponse {
    pub counts: RecordCounts,
    pub income: ChartSeries,
    pub sales: ChartSeries,
    pub total_income: f64,
    pub total_sales: f64,
    pub chart_colors: ChartColors,
    pub income_filter: FilterEcho,
    pub sales_filter: FilterEcho,
    pub current_year: i32,
    pub year_choices: [i32; 2],
    pub month_choices: Vec<MonthChoice>,
}
