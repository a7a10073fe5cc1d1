use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::employees::dto::EmployeePage;
use crate::error::{on_duplicate, AppError};

/// One employee-laptop assignment. `national_identity`, `email` and
/// `serial_number` are each unique at the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EmployeeLaptop {
    pub id: Uuid,
    pub firstname: String,
    pub lastname: String,
    #[serde(rename = "nationalIdentity")]
    pub national_identity: String,
    pub telephone: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub laptop_manufacturer: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub created_at: OffsetDateTime,
}

/// Validated insert input, produced by the create request's `validate`.
#[derive(Debug, Clone)]
pub struct NewEmployeeLaptop {
    pub firstname: String,
    pub lastname: String,
    pub national_identity: String,
    pub telephone: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub laptop_manufacturer: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
}

/// Page/limit pair clamped to valid values. Out-of-range input is
/// normalized, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: i64,
    pub limit: i64,
}

impl PageParams {
    pub fn clamp(page: i64, limit: i64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

/// Ceiling division; `limit` is already clamped to >= 1.
pub fn total_pages(total: i64, limit: i64) -> i64 {
    (total + limit - 1) / limit
}

const COLUMNS: &str = "id, firstname, lastname, national_identity, telephone, email, \
                       department, position, laptop_manufacturer, model, serial_number, \
                       created_at";

impl EmployeeLaptop {
    /// Single atomic insert. No pre-check: the database's unique
    /// constraints are the sole arbiter under concurrent writers.
    pub async fn insert(db: &PgPool, new: &NewEmployeeLaptop) -> Result<Uuid, AppError> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO employee_laptops (
                firstname, lastname, national_identity, telephone, email, department,
                position, laptop_manufacturer, model, serial_number
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id
            "#,
        )
        .bind(&new.firstname)
        .bind(&new.lastname)
        .bind(&new.national_identity)
        .bind(&new.telephone)
        .bind(&new.email)
        .bind(&new.department)
        .bind(&new.position)
        .bind(&new.laptop_manufacturer)
        .bind(&new.model)
        .bind(&new.serial_number)
        .fetch_one(db)
        .await
        .map_err(|e| on_duplicate(e, "Duplicate national ID, email, or serial number"))?;
        Ok(id)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<EmployeeLaptop>, AppError> {
        let employee = sqlx::query_as::<_, EmployeeLaptop>(&format!(
            "SELECT {COLUMNS} FROM employee_laptops WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(employee)
    }

    /// Every record, in the same stable order the paginated path uses.
    pub async fn list_all(db: &PgPool) -> Result<Vec<EmployeeLaptop>, AppError> {
        let employees = sqlx::query_as::<_, EmployeeLaptop>(&format!(
            "SELECT {COLUMNS} FROM employee_laptops ORDER BY created_at, id"
        ))
        .fetch_all(db)
        .await?;
        Ok(employees)
    }

    /// Offset pagination over a stable `created_at, id` order. The count is
    /// a second round trip; a concurrent insert between the two can skew
    /// `pages` for that one response.
    pub async fn list_page(db: &PgPool, page: i64, limit: i64) -> Result<EmployeePage, AppError> {
        let params = PageParams::clamp(page, limit);
        let employees = sqlx::query_as::<_, EmployeeLaptop>(&format!(
            "SELECT {COLUMNS} FROM employee_laptops ORDER BY created_at, id \
             LIMIT $1 OFFSET $2"
        ))
        .bind(params.limit)
        .bind(params.offset())
        .fetch_all(db)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employee_laptops")
            .fetch_one(db)
            .await?;

        Ok(EmployeePage {
            employees,
            total,
            page: params.page,
            pages: total_pages(total, params.limit),
        })
    }
}
