use rust_decimal::Decimal;

use crate::core::error::AppError;
use crate::modules::transactions::models::TransactionStatus;

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Largest value a DECIMAL(12, 2) column holds
fn max_sales_price() -> Decimal {
    Decimal::new(999_999_999_999, 2)
}

/// Gross Commission Income for one deal.
///
/// Defined only for closed deals with both a commission percentage and a final
/// sales price: `commission_percentage / 100 * final_sales_price`. Any other
/// combination yields `None`, which callers must leave out of totals rather
/// than count as zero.
///
/// The percentage is passed as stored (5.00 for 5%); callers must not divide
/// it themselves.
pub fn gross_commission_income(
    status: TransactionStatus,
    commission_percentage: Option<Decimal>,
    final_sales_price: Option<Decimal>,
) -> Option<Decimal> {
    if status != TransactionStatus::Closed {
        return None;
    }

    let percentage = commission_percentage?;
    let price = final_sales_price?;

    Some(percentage / ONE_HUNDRED * price)
}

/// Commission is a percentage between 0 and 100 with at most 2 decimal places
pub fn validate_commission_percentage(percentage: Decimal) -> Result<(), AppError> {
    if percentage < Decimal::ZERO {
        return Err(AppError::Validation(
            "Commission percentage cannot be negative".to_string(),
        ));
    }

    if percentage > ONE_HUNDRED {
        return Err(AppError::Validation(
            "Commission percentage cannot exceed 100".to_string(),
        ));
    }

    if percentage.normalize().scale() > 2 {
        return Err(AppError::Validation(
            "Commission percentage cannot have more than 2 decimal places".to_string(),
        ));
    }

    Ok(())
}

/// Sales price must fit DECIMAL(12, 2) and be non-negative
pub fn validate_sales_price(price: Decimal) -> Result<(), AppError> {
    if price < Decimal::ZERO {
        return Err(AppError::Validation(
            "Final sales price cannot be negative".to_string(),
        ));
    }

    if price > max_sales_price() {
        return Err(AppError::Validation(
            "Final sales price is too large".to_string(),
        ));
    }

    if price.normalize().scale() > 2 {
        return Err(AppError::Validation(
            "Final sales price cannot have more than 2 decimal places".to_string(),
        ));
    }

    Ok(())
}
