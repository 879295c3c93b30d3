use crate::errors::AppError;

/// Parses a path id into a positive database id.
pub fn valid_id(id: &str) -> Result<i64, AppError> {
    id.trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::InvalidInput("Invalid id format".to_string()))
}
