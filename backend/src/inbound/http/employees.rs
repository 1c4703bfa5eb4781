//! Employee administration and login handlers.
//!
//! ```text
//! POST   /api/v1/employees
//! GET    /api/v1/employees?activeOnly=true
//! GET    /api/v1/employees/{id}
//! PUT    /api/v1/employees/{id}
//! POST   /api/v1/employees/{id}/activate
//! POST   /api/v1/employees/{id}/deactivate
//! DELETE /api/v1/employees/{id}
//! POST   /api/v1/employees/login
//! ```
//!
//! Passwords are accepted in request bodies only and never echoed back.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{EmployeeUpdate, NewEmployee};
use crate::domain::{
    Employee, EmployeeId, EmployeeProfile, EmployeeValidationError, Error, LoginCredentials,
    Password,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{EmployeeSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EmployeeBody {
    pub name: String,
    #[schema(format = "email")]
    pub email: String,
    /// Required on registration. On update an absent password keeps the
    /// stored credential.
    #[schema(format = "password")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LoginBody {
    #[schema(format = "email")]
    pub email: String,
    #[schema(format = "password")]
    pub password: String,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeListQuery {
    /// Hide deactivated employees.
    #[serde(default)]
    pub active_only: bool,
}

fn field_for(err: &EmployeeValidationError) -> &'static str {
    match err {
        EmployeeValidationError::EmptyName | EmployeeValidationError::NameTooLong { .. } => "name",
        EmployeeValidationError::InvalidEmail | EmployeeValidationError::EmailTooLong { .. } => {
            "email"
        }
        EmployeeValidationError::EmptyPassword => "password",
    }
}

fn map_validation_error(err: EmployeeValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field_for(&err) }))
}

fn missing_password() -> Error {
    map_validation_error(EmployeeValidationError::EmptyPassword)
}

impl EmployeeBody {
    fn profile(&self) -> ApiResult<EmployeeProfile> {
        EmployeeProfile::new(&self.name, &self.email).map_err(map_validation_error)
    }

    fn password(&self) -> ApiResult<Option<Password>> {
        self.password
            .as_deref()
            .map(|raw| Password::new(raw).map_err(map_validation_error))
            .transpose()
    }
}

fn employee_id(raw: &str) -> ApiResult<EmployeeId> {
    parse_id(raw, FieldName::new("employeeId"))
}

#[utoipa::path(
    post,
    path = "/api/v1/employees",
    request_body = EmployeeBody,
    responses(
        (status = 201, description = "Employee registered", body = EmployeeSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "createEmployee"
)]
#[post("/employees")]
pub async fn create_employee(
    state: web::Data<HttpState>,
    payload: web::Json<EmployeeBody>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let request = NewEmployee {
        profile: body.profile()?,
        password: body.password()?.ok_or_else(missing_password)?,
    };
    let employee = state.employees.create_employee(request).await?;
    Ok(HttpResponse::Created().json(employee))
}

#[utoipa::path(
    get,
    path = "/api/v1/employees",
    params(EmployeeListQuery),
    responses((status = 200, description = "Employees", body = [EmployeeSchema])),
    tags = ["employees"],
    operation_id = "listEmployees"
)]
#[get("/employees")]
pub async fn list_employees(
    state: web::Data<HttpState>,
    query: web::Query<EmployeeListQuery>,
) -> ApiResult<web::Json<Vec<Employee>>> {
    let employees = state.employees.list_employees(query.active_only).await?;
    Ok(web::Json(employees))
}

/// Verify an employee's credentials.
///
/// Unknown emails, wrong passwords and deactivated accounts are
/// indistinguishable to the caller.
#[utoipa::path(
    post,
    path = "/api/v1/employees/login",
    request_body = LoginBody,
    responses(
        (status = 200, description = "Credentials accepted", body = EmployeeSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "loginEmployee"
)]
#[post("/employees/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginBody>,
) -> ApiResult<web::Json<Employee>> {
    let body = payload.into_inner();
    let credentials =
        LoginCredentials::try_from_parts(&body.email, &body.password).map_err(map_validation_error)?;
    let employee = state.employees.authenticate(credentials).await?;
    info!(employee_id = %employee.id(), "employee signed in");
    Ok(web::Json(employee))
}

#[utoipa::path(
    get,
    path = "/api/v1/employees/{id}",
    params(("id" = String, Path, description = "Employee identifier")),
    responses(
        (status = 200, description = "Employee", body = EmployeeSchema),
        (status = 404, description = "Employee not found", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "getEmployee"
)]
#[get("/employees/{id}")]
pub async fn get_employee(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Employee>> {
    let employee = state.employees.get_employee(employee_id(&path)?).await?;
    Ok(web::Json(employee))
}

#[utoipa::path(
    put,
    path = "/api/v1/employees/{id}",
    params(("id" = String, Path, description = "Employee identifier")),
    request_body = EmployeeBody,
    responses(
        (status = 200, description = "Employee updated", body = EmployeeSchema),
        (status = 404, description = "Employee not found", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "updateEmployee"
)]
#[put("/employees/{id}")]
pub async fn update_employee(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<EmployeeBody>,
) -> ApiResult<web::Json<Employee>> {
    let body = payload.into_inner();
    let request = EmployeeUpdate {
        employee_id: employee_id(&path)?,
        profile: body.profile()?,
        password: body.password()?,
    };
    let employee = state.employees.update_employee(request).await?;
    Ok(web::Json(employee))
}

#[utoipa::path(
    post,
    path = "/api/v1/employees/{id}/activate",
    params(("id" = String, Path, description = "Employee identifier")),
    responses(
        (status = 200, description = "Employee activated", body = EmployeeSchema),
        (status = 404, description = "Employee not found", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "activateEmployee"
)]
#[post("/employees/{id}/activate")]
pub async fn activate_employee(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Employee>> {
    let employee = state
        .employees
        .set_employee_active(employee_id(&path)?, true)
        .await?;
    Ok(web::Json(employee))
}

#[utoipa::path(
    post,
    path = "/api/v1/employees/{id}/deactivate",
    params(("id" = String, Path, description = "Employee identifier")),
    responses(
        (status = 200, description = "Employee deactivated", body = EmployeeSchema),
        (status = 404, description = "Employee not found", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "deactivateEmployee"
)]
#[post("/employees/{id}/deactivate")]
pub async fn deactivate_employee(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Employee>> {
    let employee = state
        .employees
        .set_employee_active(employee_id(&path)?, false)
        .await?;
    Ok(web::Json(employee))
}

#[utoipa::path(
    delete,
    path = "/api/v1/employees/{id}",
    params(("id" = String, Path, description = "Employee identifier")),
    responses(
        (status = 204, description = "Employee deleted"),
        (status = 404, description = "Employee not found", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "deleteEmployee"
)]
#[delete("/employees/{id}")]
pub async fn delete_employee(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state.employees.delete_employee(employee_id(&path)?).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "employees_tests.rs"]
mod tests;
