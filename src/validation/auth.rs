use crate::error::{AppError, Result};

/// Validates a user id.
///
/// # Arguments
///
/// * `user_id` - The user id to validate.
///
/// # Returns
///
/// A `Result<()>` indicating whether the user id is valid.
pub fn validate_user_id(user_id: &str) -> Result<()> {
    if user_id.len() < 3 {
        return Err(AppError::Validation(
            "User id must be at least 3 characters long".to_string(),
        ));
    }

    if user_id.len() > 255 {
        return Err(AppError::Validation(
            "User id must be at most 255 characters".to_string(),
        ));
    }

    if !user_id.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-' || c == '.') {
        return Err(AppError::Validation(
            "User id can only contain letters, numbers, dots, underscores, and hyphens".to_string(),
        ));
    }

    Ok(())
}

/// Validates a password.
///
/// # Arguments
///
/// * `password` - The password to validate.
///
/// # Returns
///
/// A `Result<()>` indicating whether the password is valid.
pub fn validate_password(password: &str) -> Result<()> {
    if password.len() < 8 {
        return Err(AppError::Validation(
            "Password must be at least 8 characters long".to_string(),
        ));
    }

    if password.len() > 128 {
        return Err(AppError::Validation(
            "Password must be at most 128 characters".to_string(),
        ));
    }

    Ok(())
}
