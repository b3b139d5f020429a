use rust_decimal::Decimal;

use crate::core::money::{format_usd_whole, to_chart_value};
use crate::modules::dashboard::models::{month_name, ChartSeries, ChartWindow, MonthBucket, RoleTotals};

/// Month labels for a window: `Jan`..`Dec`, or `May 2024` for a single month
pub fn month_labels(window: &ChartWindow) -> Vec<String> {
    match window.months.as_slice() {
        [only] => vec![format!("{} {}", month_name(only.month), only.year)],
        months => months
            .iter()
            .map(|m| month_name(m.month).to_string())
            .collect(),
    }
}

/// Income (GCI) chart. Counts are deals with a defined GCI.
pub fn present_income(window: &ChartWindow, buckets: &[MonthBucket]) -> ChartSeries {
    present(window, buckets, |t| t.gci_total, |t| t.gci_count)
}

/// Sales volume chart. Counts are all closed deals.
pub fn present_sales(window: &ChartWindow, buckets: &[MonthBucket]) -> ChartSeries {
    present(window, buckets, |t| t.sales_total, |t| t.closed_count)
}

fn present(
    window: &ChartWindow,
    buckets: &[MonthBucket],
    value: impl Fn(&RoleTotals) -> Decimal,
    count: impl Fn(&RoleTotals) -> u32,
) -> ChartSeries {
    let mut grand_total = Decimal::ZERO;
    let mut total = Vec::with_capacity(buckets.len());

    for bucket in buckets {
        let month_total = value(&bucket.buyer) + value(&bucket.seller) + value(&bucket.dual);
        grand_total += month_total;
        total.push(to_chart_value(month_total));
    }

    ChartSeries {
        labels: month_labels(window),
        total,
        buyer: buckets.iter().map(|b| to_chart_value(value(&b.buyer))).collect(),
        seller: buckets.iter().map(|b| to_chart_value(value(&b.seller))).collect(),
        dual: buckets.iter().map(|b| to_chart_value(value(&b.dual))).collect(),
        count_buyer: buckets.iter().map(|b| count(&b.buyer)).collect(),
        count_seller: buckets.iter().map(|b| count(&b.seller)).collect(),
        count_dual: buckets.iter().map(|b| count(&b.dual)).collect(),
        grand_total: to_chart_value(grand_total),
        grand_total_display: format_usd_whole(grand_total),
    }
}
