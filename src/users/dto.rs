use serde::{Deserialize, Serialize};

use crate::error::{AppError, FieldError};
use crate::users::repo::PublicUser;
use crate::validate::is_valid_email;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, rename = "confirmPassword")]
    pub confirm_password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();
        if !is_valid_email(&self.email) {
            errors.push(FieldError::new("email", "Invalid email"));
        }
        if self.password.len() < 8 {
            errors.push(FieldError::new(
                "password",
                "Password must be at least 8 characters",
            ));
        }
        if self.confirm_password != self.password {
            errors.push(FieldError::new("confirmPassword", "Passwords do not match"));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();
        if !is_valid_email(&self.email) {
            errors.push(FieldError::new("email", "Invalid email"));
        }
        if self.password.is_empty() {
            errors.push(FieldError::new("password", "Password is required"));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors))
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: &'static str,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: PublicUser,
}

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub users: Vec<PublicUser>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_accepts_valid_input() {
        let req = RegisterRequest {
            email: "a@b.com".into(),
            password: "longenough1".into(),
            confirm_password: "longenough1".into(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn register_lists_every_failing_field() {
        let req = RegisterRequest {
            email: "nope".into(),
            password: "short".into(),
            confirm_password: "different".into(),
        };
        let err = req.validate().unwrap_err();
        let AppError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["email", "password", "confirmPassword"]);
    }

    #[test]
    fn register_rejects_password_mismatch() {
        let req = RegisterRequest {
            email: "a@b.com".into(),
            password: "longenough1".into(),
            confirm_password: "longenough2".into(),
        };
        let err = req.validate().unwrap_err();
        let AppError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "confirmPassword");
    }

    #[test]
    fn login_requires_password() {
        let req = LoginRequest {
            email: "a@b.com".into(),
            password: String::new(),
        };
        let err = req.validate().unwrap_err();
        let AppError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors[0].field, "password");
    }

    #[test]
    fn login_response_carries_message_and_token() {
        let resp = LoginResponse {
            message: "Login successful.",
            token: "abc.def.ghi".into(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("Login successful."));
        assert!(json.contains("abc.def.ghi"));
    }
}
