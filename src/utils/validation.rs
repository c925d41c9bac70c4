use validator::ValidationError;

use crate::utils::error::{AppError, AppResult};

/// Rejects empty and whitespace-only strings.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Checks a lookup key before it reaches a repository.
pub fn require_key(value: &str, message: &str) -> AppResult<()> {
    not_blank(value).map_err(|_| AppError::ValidationError(message.to_string()))
}
