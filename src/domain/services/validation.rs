use crate::error::AppError;

/// Trims `value` and rejects it when nothing is left.
pub fn required_text(field: &str, value: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

/// Blank optional strings are stored as absent.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Lowercased so logins match regardless of how the address was typed.
pub fn email(value: &str) -> Result<String, AppError> {
    let email = required_text("email", value)?.to_lowercase();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if !valid {
        return Err(AppError::Validation("email is invalid".into()));
    }
    Ok(email)
}

pub const MIN_PASSWORD_LEN: usize = 8;

pub fn password(value: &str) -> Result<&str, AppError> {
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!("password must be at least {} characters", MIN_PASSWORD_LEN)));
    }
    Ok(value)
}

pub fn non_negative_price(field: &str, value: f64) -> Result<f64, AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::Validation(format!("{} must be a non-negative number", field)));
    }
    Ok(value)
}

pub fn non_negative_count(field: &str, value: i32) -> Result<i32, AppError> {
    if value < 0 {
        return Err(AppError::Validation(format!("{} must not be negative", field)));
    }
    Ok(value)
}

/// Trims each tag and drops empty ones, keeping their order.
pub fn tags(values: Vec<String>) -> Vec<String> {
    values.into_iter().map(|t| t.trim().to_string()).filter(|t| !t.is_empty()).collect()
}
