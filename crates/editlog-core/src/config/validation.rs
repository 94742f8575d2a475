//! Validation of user-entered settings

use crate::error::{EditLogError, EditLogResult};

/// Parse a user-entered number and reject values below `min`
///
/// Input is rejected rather than clamped so the caller can show the
/// message next to the field that produced it.
pub fn validate_number(input: &str, min: u64) -> EditLogResult<u64> {
    let trimmed = input.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| EditLogError::validation(format!("'{}': a number is required", trimmed)))?;

    if value < 0 || (value as u64) < min {
        return Err(EditLogError::validation(format!(
            "value must be at least {}",
            min
        )));
    }

    Ok(value as u64)
}
