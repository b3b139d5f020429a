mod chart;
mod dashboard;

pub use chart::{
    month_name, ChartFilter, ChartPeriod, ChartWindow, MonthBucket, RoleFilter, RoleTotals,
    MONTH_NAMES,
};
pub use dashboard::{
    ChartSeries, DashboardQuery, DashboardResponse, FilterEcho, MonthChoice, RecordCounts,
};
