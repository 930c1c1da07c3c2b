//! Email validation functions

/// Validates basic email format
///
/// When the `rfc-email` feature is enabled, defers to the `email_address` crate.
/// Otherwise checks for:
/// - Exactly one '@' symbol
/// - Content before and after '@'
/// - At least one '.' in the domain part, TLD of two or more characters
#[cfg(feature = "rfc-email")]
pub fn is_valid_email(email: &str) -> bool {
    email_address::EmailAddress::is_valid(email)
}

#[cfg(not(feature = "rfc-email"))]
pub fn is_valid_email(email: &str) -> bool {
    if email.len() < 3 {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    // Must have exactly one @ symbol
    if domain.contains('@') {
        return false;
    }

    if local.is_empty() || local.len() > 64 {
        return false;
    }

    if domain.is_empty() || domain.len() > 255 {
        return false;
    }

    if !domain.contains('.') {
        return false;
    }

    if domain.starts_with('.') || domain.ends_with('.')
        || domain.starts_with('-') || domain.ends_with('-') {
        return false;
    }

    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }

    if domain.contains("..") {
        return false;
    }

    let valid_local_chars = |c: char| {
        c.is_alphanumeric() || c == '.' || c == '_' || c == '-' || c == '+'
    };

    if !local.chars().all(valid_local_chars) {
        return false;
    }

    let valid_domain_chars = |c: char| {
        c.is_alphanumeric() || c == '.' || c == '-'
    };

    if !domain.chars().all(valid_domain_chars) {
        return false;
    }

    // TLD must be at least 2 characters
    if let Some(last_dot_pos) = domain.rfind('.') {
        let tld = &domain[last_dot_pos + 1..];
        if tld.chars().count() < 2 {
            return false;
        }
    }

    true
}

pub const INVALID_EMAIL_MESSAGE: &str = "Invalid email address";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("test.user@example.co.uk"));
        assert!(is_valid_email("user+tag@example.com"));
        assert!(is_valid_email("user_name@example-domain.com"));
    }

    #[test]
    #[cfg(not(feature = "rfc-email"))]
    fn test_invalid_emails() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("@"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@@example.com"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("user@.com"));
        assert!(!is_valid_email("user@example..com"));
        assert!(!is_valid_email("user name@example.com"));
    }
}
