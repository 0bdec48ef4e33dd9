use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Per-field validation failures, keyed by payload field name.
#[derive(Debug, Default, Serialize)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<String>>);

impl FieldErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub fn check_email(errors: &mut FieldErrors, email: &str) {
    if !is_valid_email(email) {
        errors.push("email", "must be a valid email address");
    }
}

pub fn check_password(errors: &mut FieldErrors, password: &str) {
    if password.len() < 8 {
        errors.push("password", "must be at least 8 characters");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last@sub.example.org"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn check_password_boundary() {
        let mut errors = FieldErrors::default();
        check_password(&mut errors, "12345678");
        assert!(errors.is_empty());

        check_password(&mut errors, "1234567");
        assert!(!errors.is_empty());
    }

    #[test]
    fn errors_accumulate_per_field() {
        let mut errors = FieldErrors::default();
        check_email(&mut errors, "nope");
        check_password(&mut errors, "short");

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["email"][0], "must be a valid email address");
        assert_eq!(json["password"][0], "must be at least 8 characters");
    }
}
