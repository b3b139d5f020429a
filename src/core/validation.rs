use crate::core::{AppError, Result};

/// Trims a required text field, rejecting blank values.
pub fn required(field: &str, value: &str, max_len: usize) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{} is required", field)));
    }
    bounded(field, trimmed, max_len)?;
    Ok(trimmed.to_string())
}

/// Trims an optional text field; missing input becomes an empty string.
pub fn optional(field: &str, value: Option<&str>, max_len: usize) -> Result<String> {
    let trimmed = value.map(str::trim).unwrap_or_default();
    bounded(field, trimmed, max_len)?;
    Ok(trimmed.to_string())
}

/// Optional email. Blank is allowed; anything else needs a local part and a domain.
pub fn optional_email(field: &str, value: Option<&str>) -> Result<String> {
    let email = optional(field, value, 254)?;
    if email.is_empty() {
        return Ok(email);
    }

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') && !domain.starts_with('.') => {
            Ok(email)
        }
        _ => Err(AppError::validation(format!(
            "{} must be a valid email address",
            field
        ))),
    }
}

fn bounded(field: &str, value: &str, max_len: usize) -> Result<()> {
    if value.chars().count() > max_len {
        return Err(AppError::validation(format!(
            "{} must be at most {} characters",
            field, max_len
        )));
    }
    Ok(())
}
