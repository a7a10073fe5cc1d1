use serde::{Deserialize, Serialize};

use crate::employees::repo::{EmployeeLaptop, NewEmployeeLaptop};
use crate::error::{AppError, FieldError};
use crate::validate::is_valid_email;

/// Raw create body. Everything is optional at the parse step; `validate`
/// enumerates each field's constraint and reports all failures at once.
#[derive(Debug, Deserialize)]
pub struct CreateEmployeeRequest {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    #[serde(rename = "nationalIdentity")]
    pub national_identity: Option<String>,
    pub telephone: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub laptop_manufacturer: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
}

fn required(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    message: &'static str,
    value: Option<String>,
) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => {
            errors.push(FieldError::new(field, message));
            String::new()
        }
    }
}

impl CreateEmployeeRequest {
    pub fn validate(self) -> Result<NewEmployeeLaptop, AppError> {
        let mut errors = Vec::new();
        let firstname = required(
            &mut errors,
            "firstname",
            "First name is required",
            self.firstname,
        );
        let lastname = required(
            &mut errors,
            "lastname",
            "Last name is required",
            self.lastname,
        );
        let national_identity = required(
            &mut errors,
            "nationalIdentity",
            "National ID is required",
            self.national_identity,
        );
        if let Some(email) = &self.email {
            if !is_valid_email(email) {
                errors.push(FieldError::new("email", "Invalid email"));
            }
        }
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }
        Ok(NewEmployeeLaptop {
            firstname,
            lastname,
            national_identity,
            telephone: self.telephone,
            email: self.email,
            department: self.department,
            position: self.position,
            laptop_manufacturer: self.laptop_manufacturer,
            model: self.model,
            serial_number: self.serial_number,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}
fn default_limit() -> i64 {
    10
}

/// Response envelope shared by the unpaginated and paginated listings.
#[derive(Debug, Serialize)]
pub struct EmployeePage {
    pub employees: Vec<EmployeeLaptop>,
    pub total: i64,
    pub page: i64,
    pub pages: i64,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> CreateEmployeeRequest {
        CreateEmployeeRequest {
            firstname: Some("Samanta".into()),
            lastname: Some("ISHIMWE".into()),
            national_identity: Some("12000710913307".into()),
            telephone: Some("0788888888".into()),
            email: Some("samanta@gmail.com".into()),
            department: Some("Human resource".into()),
            position: Some("Manager".into()),
            laptop_manufacturer: Some("HP".into()),
            model: Some("envy".into()),
            serial_number: Some("3400".into()),
        }
    }

    #[test]
    fn valid_request_passes_through_every_field() {
        let new = full_request().validate().expect("valid");
        assert_eq!(new.firstname, "Samanta");
        assert_eq!(new.national_identity, "12000710913307");
        assert_eq!(new.serial_number.as_deref(), Some("3400"));
    }

    #[test]
    fn missing_required_fields_are_all_reported() {
        let req = CreateEmployeeRequest {
            firstname: None,
            lastname: Some("  ".into()),
            national_identity: None,
            telephone: None,
            email: None,
            department: None,
            position: None,
            laptop_manufacturer: None,
            model: None,
            serial_number: None,
        };
        let err = req.validate().unwrap_err();
        let AppError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["firstname", "lastname", "nationalIdentity"]);
    }

    #[test]
    fn email_is_optional_but_must_be_well_formed() {
        let mut req = full_request();
        req.email = None;
        assert!(req.validate().is_ok());

        let mut req = full_request();
        req.email = Some("not-an-email".into());
        let err = req.validate().unwrap_err();
        let AppError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors[0].field, "email");
    }

    #[test]
    fn empty_page_envelope_shape() {
        let page = EmployeePage {
            employees: vec![],
            total: 0,
            page: 1,
            pages: 0,
        };
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["employees"], serde_json::json!([]));
        assert_eq!(json["total"], 0);
        assert_eq!(json["page"], 1);
        assert_eq!(json["pages"], 0);
    }

    #[test]
    fn page_query_defaults() {
        let q: PageQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(q.page, 1);
        assert_eq!(q.limit, 10);
    }
}
