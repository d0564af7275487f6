//! Request field validation shared by the HTTP handlers.

use validator::ValidateEmail;

use crate::error::CoreError;

/// Default avatar colour assigned to users created without one.
pub const DEFAULT_AVATAR_COLOR: &str = "#3b82f6";

/// Validate an email address.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if email.validate_email() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "'{email}' is not a valid email address"
        )))
    }
}

/// Validate an optional email; absent values pass.
pub fn validate_optional_email(email: Option<&str>) -> Result<(), CoreError> {
    email.map_or(Ok(()), validate_email)
}

/// Treat empty query-string values as absent.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn accepts_plain_address() {
        assert!(validate_email("ada@example.com").is_ok());
    }

    #[test]
    fn rejects_missing_at_sign() {
        assert_matches!(validate_email("ada.example.com"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn rejects_empty_string() {
        assert!(validate_email("").is_err());
    }

    #[test]
    fn absent_optional_email_passes() {
        assert!(validate_optional_email(None).is_ok());
        assert!(validate_optional_email(Some("nope")).is_err());
    }

    #[test]
    fn empty_filters_become_none() {
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(Some("p1".into())), Some("p1".to_string()));
        assert_eq!(non_empty(None), None);
    }
}
