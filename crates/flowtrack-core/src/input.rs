//! User input checks applied before anything reaches the store.

use crate::error::{FlowResult, FlowtrackError};

/// Trim `value` and reject it when nothing is left.
pub fn required(field: &str, value: &str) -> FlowResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FlowtrackError::validation(format!("{} must not be empty", field)));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional value; blank input counts as absent.
pub fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
