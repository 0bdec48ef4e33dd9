use serde::{Deserialize, Serialize};

use crate::users::repo::User;
use crate::validation::{check_email, check_password, FieldErrors};

/// Request body for creating or replacing a user.
#[derive(Debug, Deserialize)]
pub struct UserPayload {
    pub email: String,
    pub password: String,
}

/// Request body for changing a user's email.
#[derive(Debug, Deserialize)]
pub struct EmailPayload {
    pub email: String,
}

/// A `UserPayload` that has passed the field constraints.
#[derive(Debug)]
pub struct NewUser {
    pub email: String,
    pub password: String,
}

/// An `EmailPayload` that has passed the field constraints.
#[derive(Debug)]
pub struct EmailChange {
    pub email: String,
}

impl UserPayload {
    pub fn validated(self) -> Result<NewUser, FieldErrors> {
        let mut errors = FieldErrors::default();
        check_email(&mut errors, &self.email);
        check_password(&mut errors, &self.password);
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(NewUser {
            email: self.email,
            password: self.password,
        })
    }
}

impl EmailPayload {
    pub fn validated(self) -> Result<EmailChange, FieldErrors> {
        let mut errors = FieldErrors::default();
        check_email(&mut errors, &self.email);
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(EmailChange { email: self.email })
    }
}

/// Response wrapper for the user listing.
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub data: Vec<User>,
}

/// Single-message response used by the write endpoints.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_payload_accepts_valid_input() {
        let payload = UserPayload {
            email: "a@b.com".into(),
            password: "longenough".into(),
        };
        let user = payload.validated().expect("payload should validate");
        assert_eq!(user.email, "a@b.com");
    }

    #[test]
    fn user_payload_collects_both_field_errors() {
        let payload = UserPayload {
            email: "nope".into(),
            password: "short".into(),
        };
        let errors = payload.validated().unwrap_err();
        let json = serde_json::to_value(&errors).unwrap();
        assert!(json["email"].is_array());
        assert!(json["password"].is_array());
    }

    #[test]
    fn email_payload_checks_format_only() {
        assert!(EmailPayload { email: "a@b.com".into() }.validated().is_ok());
        assert!(EmailPayload { email: "a@b".into() }.validated().is_err());
    }

    #[test]
    fn message_response_serialization() {
        let json = serde_json::to_string(&MessageResponse {
            message: "put record success",
        })
        .unwrap();
        assert_eq!(json, r#"{"message":"put record success"}"#);
    }
}
