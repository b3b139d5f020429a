use tracing::debug;

use crate::core::YearMonth;
use crate::modules::dashboard::models::{ChartWindow, MonthBucket, RoleFilter};
use crate::modules::transactions::Transaction;

/// Group closed deals into the window's month buckets, split by role.
///
/// The bucket list comes from the window alone, so months with no deals are
/// present and zeroed. A deal counts once, in the month its `updated_at`
/// falls in when seen from the window's time zone. Deals outside the window,
/// not closed, or in a role the filter leaves out are skipped.
pub fn aggregate(
    window: &ChartWindow,
    roles: RoleFilter,
    transactions: &[Transaction],
) -> Vec<MonthBucket> {
    let mut buckets: Vec<MonthBucket> = window
        .months
        .iter()
        .copied()
        .map(MonthBucket::empty)
        .collect();
    let tz = window.start.timezone();
    let mut skipped = 0usize;

    for transaction in transactions {
        if !transaction.is_closed() || !window.contains(transaction.updated_at) {
            skipped += 1;
            continue;
        }

        let month = YearMonth::of(transaction.updated_at.with_timezone(&tz).date_naive());
        let Some(index) = window.bucket_index(month) else {
            skipped += 1;
            continue;
        };

        let role = transaction.role();
        if !roles.includes(role) {
            continue;
        }

        let totals = buckets[index].role_mut(role);
        totals.closed_count += 1;
        if let Some(price) = transaction.final_sales_price {
            totals.sales_total += price;
        }
        if let Some(gci) = transaction.gci() {
            totals.gci_total += gci;
            totals.gci_count += 1;
        }
    }

    debug!(
        months = buckets.len(),
        transactions = transactions.len(),
        skipped,
        "Aggregated closed transactions"
    );

    buckets
}
