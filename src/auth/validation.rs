use lazy_static::lazy_static;
use regex::Regex;

use crate::error::FieldErrors;

pub const INVALID_GMAIL_MESSAGE: &str =
    "Please use a valid Gmail address (example@gmail.com).";
pub const WEAK_PASSWORD_MESSAGE: &str =
    "Password must be at least 8 characters with one uppercase letter and one special character.";

/// Trims and lowercases; total, never fails.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn is_valid_gmail(email: &str) -> bool {
    lazy_static! {
        static ref GMAIL_RE: Regex =
            Regex::new(r"(?i)^[A-Za-z0-9._%+-]+@gmail\.com$").unwrap();
    }
    GMAIL_RE.is_match(email.trim())
}

/// At least 8 chars, one ASCII uppercase, one char outside [A-Za-z0-9],
/// and no whitespace anywhere.
pub fn is_strong_password(password: &str) -> bool {
    if password.chars().any(char::is_whitespace) {
        return false;
    }
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| !c.is_ascii_alphanumeric())
}

/// Field name -> message for every failing credential field; empty map means valid.
pub fn credential_errors(email: &str, password: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if email.trim().is_empty() {
        errors.insert("email", "Email is required.".into());
    } else if !is_valid_gmail(email) {
        errors.insert("email", INVALID_GMAIL_MESSAGE.into());
    }

    if password.is_empty() {
        errors.insert("password", "Password is required.".into());
    } else if !is_strong_password(password) {
        errors.insert("password", WEAK_PASSWORD_MESSAGE.into());
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_email("  Ravi.K@GMAIL.com "), "ravi.k@gmail.com");
        assert_eq!(normalize_email(""), "");
    }

    #[test]
    fn gmail_accepts_valid_addresses() {
        assert!(is_valid_gmail("ravi.k@gmail.com"));
        assert!(is_valid_gmail("Ravi.K@GMAIL.com"));
        assert!(is_valid_gmail("  a_b%c+d@gmail.com  "));
    }

    #[test]
    fn gmail_rejects_other_domains_and_garbage() {
        assert!(!is_valid_gmail("ravi@yahoo.com"));
        assert!(!is_valid_gmail("ravi@gmail.org"));
        assert!(!is_valid_gmail("@gmail.com"));
        assert!(!is_valid_gmail("ravi@gmailXcom"));
        assert!(!is_valid_gmail("ravi k@gmail.com"));
        assert!(!is_valid_gmail(""));
    }

    #[test]
    fn strong_password_examples() {
        assert!(!is_strong_password("password1")); // no uppercase, no special
        assert!(is_strong_password("Password!"));
        assert!(is_strong_password("Secret@123"));
    }

    #[test]
    fn strong_password_rejection_classes() {
        assert!(!is_strong_password("Ab!4567")); // too short
        assert!(!is_strong_password("abcdefg!")); // no uppercase
        assert!(!is_strong_password("Abcdefg1")); // no special char
        assert!(!is_strong_password("Abcd efg!")); // whitespace
        assert!(!is_strong_password(""));
    }

    #[test]
    fn credential_errors_reports_each_failing_field() {
        let errors = credential_errors("nope@yahoo.com", "weak");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors["email"], INVALID_GMAIL_MESSAGE);
        assert_eq!(errors["password"], WEAK_PASSWORD_MESSAGE);

        let errors = credential_errors("", "");
        assert_eq!(errors["email"], "Email is required.");
        assert_eq!(errors["password"], "Password is required.");

        assert!(credential_errors("ravi.k@gmail.com", "Secret@123").is_empty());
    }
}
