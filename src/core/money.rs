use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Converts an exact amount to a chart value. Presentation only; totals are
/// always summed as `Decimal` before this is called.
pub fn to_chart_value(amount: Decimal) -> f64 {
    amount.to_f64().unwrap_or(0.0)
}

/// US dollar display with thousands separators and no cents, e.g. `$1,250,000`.
pub fn format_usd_whole(amount: Decimal) -> String {
    let rounded = amount.round_dp(0);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Validates that an optional amount is not negative.
pub fn validate_non_negative(field: &str, amount: Option<Decimal>) -> Result<(), String> {
    match amount {
        Some(value) if value < Decimal::ZERO => Err(format!("{} cannot be negative", field)),
        _ => Ok(()),
    }
}
