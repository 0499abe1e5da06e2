//! Field-level form validators. Each returns `Some(message)` on violation,
//! `None` when the value is acceptable.

/// Validate a required text field with a max length.
pub fn validate_required(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(format!("{field_name} is required"));
    }
    if trimmed.len() > max_len {
        return Some(format!("{field_name} must be at most {max_len} characters"));
    }
    None
}

/// Validate an optional text field with a max length (empty is OK).
pub fn validate_optional(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    let trimmed = value.trim();
    if !trimmed.is_empty() && trimmed.len() > max_len {
        return Some(format!("{field_name} must be at most {max_len} characters"));
    }
    None
}

/// Validate a required strictly-positive decimal (e.g. a price).
pub fn validate_positive_decimal(value: &str, field_name: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(format!("{field_name} is required"));
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v > 0.0 => None,
        Ok(_) => Some(format!("{field_name} must be greater than zero")),
        Err(_) => Some(format!("{field_name} must be a number")),
    }
}

/// Validate a required strictly-positive integer (e.g. delivery days).
pub fn validate_positive_int(value: &str, field_name: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(format!("{field_name} is required"));
    }
    match trimmed.parse::<i64>() {
        Ok(v) if v > 0 => None,
        Ok(_) => Some(format!("{field_name} must be greater than zero")),
        Err(_) => Some(format!("{field_name} must be a whole number")),
    }
}

/// Validate an optional integer within an inclusive range (empty is OK).
pub fn validate_int_range(value: &str, field_name: &str, min: i64, max: i64) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<i64>() {
        Ok(v) if (min..=max).contains(&v) => None,
        Ok(_) => Some(format!("{field_name} must be between {min} and {max}")),
        Err(_) => Some(format!("{field_name} must be a whole number")),
    }
}
