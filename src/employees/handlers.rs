use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::{
    auth::gate::AuthUser,
    employees::{
        dto::{CreateEmployeeRequest, EmployeePage, MessageResponse, PageQuery},
        repo::EmployeeLaptop,
    },
    error::AppError,
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/employees/all", get(list_employees))
        .route("/employees/allPerPage", get(list_employees_page))
        .route("/employees/:id", get(get_employee_by_id))
}

pub fn write_routes() -> Router<AppState> {
    Router::new().route("/employees/create", post(create_employee))
}

#[instrument(skip(state, payload))]
pub async fn create_employee(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<CreateEmployeeRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let new = payload.validate()?;
    let id = EmployeeLaptop::insert(&state.db, &new).await?;
    info!(employee_id = %id, created_by = %claims.sub, "employee added");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Employee added",
        }),
    ))
}

/// Unpaginated listing. Shares the page envelope with the paginated route:
/// `page` is always 1 and `pages` is 0 for an empty store, 1 otherwise.
#[instrument(skip(state, claims))]
pub async fn list_employees(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<EmployeePage>, AppError> {
    debug!(user = %claims.sub, "listing all employees");
    let employees = EmployeeLaptop::list_all(&state.db).await?;
    let total = employees.len() as i64;
    Ok(Json(EmployeePage {
        employees,
        total,
        page: 1,
        pages: if total == 0 { 0 } else { 1 },
    }))
}

#[instrument(skip(state, claims))]
pub async fn list_employees_page(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Query(q): Query<PageQuery>,
) -> Result<Json<EmployeePage>, AppError> {
    debug!(user = %claims.sub, page = q.page, limit = q.limit, "paging employees");
    let page = EmployeeLaptop::list_page(&state.db, q.page, q.limit).await?;
    Ok(Json(page))
}

#[instrument(skip(state, claims))]
pub async fn get_employee_by_id(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<EmployeeLaptop>, AppError> {
    debug!(user = %claims.sub, employee_id = %id, "employee lookup");
    let employee = EmployeeLaptop::find_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("Employee not found"))?;
    Ok(Json(employee))
}
