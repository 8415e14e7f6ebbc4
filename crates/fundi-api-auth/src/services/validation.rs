//! Input validation helpers.
//!
//! All checks here run before any provider or store call; a request that
//! fails them produces a verbatim 400 and causes no side effects.

use crate::error::ApiAuthError;

/// Validate password complexity.
///
/// Requirements:
/// - Minimum 8 characters
/// - At least one uppercase letter (A-Z)
/// - At least one lowercase letter (a-z)
/// - At least one digit (0-9)
pub fn validate_password_complexity(password: &str) -> Result<(), ApiAuthError> {
    let mut errors = Vec::new();

    if password.len() < 8 {
        errors.push("Password must be at least 8 characters".to_string());
    }

    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter".to_string());
    }

    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter".to_string());
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiAuthError::WeakPassword(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_complexity_valid() {
        assert!(validate_password_complexity("SecureP@ss123").is_ok());
        assert!(validate_password_complexity("Abcdefg1").is_ok());
    }

    #[test]
    fn test_password_complexity_too_short() {
        let result = validate_password_complexity("Short1A");
        assert!(result.is_err());
        if let Err(ApiAuthError::WeakPassword(errors)) = result {
            assert!(errors.iter().any(|e| e.contains("at least 8 characters")));
        }
    }

    #[test]
    fn test_password_complexity_missing_uppercase() {
        let result = validate_password_complexity("lowercase123");
        assert!(matches!(result, Err(ApiAuthError::WeakPassword(_))));
    }

    #[test]
    fn test_password_complexity_missing_digit() {
        let result = validate_password_complexity("NoDigitsHere");
        assert!(matches!(result, Err(ApiAuthError::WeakPassword(_))));
    }

    #[test]
    fn test_password_complexity_multiple_failures() {
        let result = validate_password_complexity("short");
        if let Err(ApiAuthError::WeakPassword(errors)) = result {
            assert!(errors.len() >= 2);
        } else {
            panic!("expected WeakPassword");
        }
    }
}
