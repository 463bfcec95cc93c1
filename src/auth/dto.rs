use serde::{Deserialize, Serialize};

use crate::users::entity::{
    email_too_long, is_valid_email, password_too_short, MAX_EMAIL_LEN, MIN_PASSWORD_LEN,
};

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Tokens returned after a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
}

/// One failed field check.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Envelope for every successful response.
#[derive(Debug, Serialize)]
pub struct SuccessResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn new(message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }
}

/// Envelope for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn check_email(email: &str, errors: &mut Vec<FieldError>) {
    if email.is_empty() {
        errors.push(FieldError::new("email", "email is a required field"));
    } else if email_too_long(email) {
        errors.push(FieldError::new(
            "email",
            format!("email must be a maximum of {MAX_EMAIL_LEN} characters in length"),
        ));
    } else if !is_valid_email(email) {
        errors.push(FieldError::new("email", "email must be a valid email address"));
    }
}

fn finish(errors: Vec<FieldError>) -> Result<(), Vec<FieldError>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

impl RegisterRequest {
    pub fn normalize(&mut self) {
        self.email = normalize_email(&self.email);
    }

    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        check_email(&self.email, &mut errors);
        if self.password.is_empty() {
            errors.push(FieldError::new("password", "password is a required field"));
        } else if password_too_short(&self.password) {
            errors.push(FieldError::new(
                "password",
                format!("password must be at least {MIN_PASSWORD_LEN} characters in length"),
            ));
        }
        finish(errors)
    }
}

impl LoginRequest {
    pub fn normalize(&mut self) {
        self.email = normalize_email(&self.email);
    }

    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        check_email(&self.email, &mut errors);
        if self.password.is_empty() {
            errors.push(FieldError::new("password", "password is a required field"));
        }
        finish(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.into(),
            password: password.into(),
        }
    }

    #[test]
    fn normalize_trims_and_lowercases() {
        let mut req = register("  Test@Example.COM ", "password");
        req.normalize();
        assert_eq!(req.email, "test@example.com");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn register_reports_every_bad_field() {
        let errors = register("", "").validate().unwrap_err();
        assert_eq!(
            errors,
            vec![
                FieldError::new("email", "email is a required field"),
                FieldError::new("password", "password is a required field"),
            ]
        );
    }

    #[test]
    fn register_reports_shape_and_length() {
        let errors = register("not-an-email", "12345").validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].message, "email must be a valid email address");
        assert_eq!(
            errors[1].message,
            "password must be at least 6 characters in length"
        );

        let long = format!("{}@example.com", "a".repeat(MAX_EMAIL_LEN));
        let errors = register(&long, "password").validate().unwrap_err();
        assert_eq!(
            errors[0].message,
            "email must be a maximum of 100 characters in length"
        );
    }

    #[test]
    fn login_does_not_enforce_password_length() {
        let req = LoginRequest {
            email: "a@example.com".into(),
            password: "123".into(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn missing_fields_deserialize_as_empty() {
        let req: LoginRequest = serde_json::from_str(r#"{"email":"a@example.com"}"#)
            .expect("deserialize");
        let errors = req.validate().unwrap_err();
        assert_eq!(errors[0].field, "password");
    }

    #[test]
    fn success_envelope_omits_missing_data() {
        let json = serde_json::to_value(SuccessResponse::<()>::new("Registration success", None))
            .expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"success": true, "message": "Registration success"})
        );
    }
}
