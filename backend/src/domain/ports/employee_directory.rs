//! Driving port for employee administration and login.

use async_trait::async_trait;

use crate::domain::{
    Employee, EmployeeId, EmployeeProfile, Error, LoginCredentials, Password, PasswordHash,
};

/// Request to register an employee. New employees start active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub profile: EmployeeProfile,
    pub password: Password,
}

/// Request to replace an employee's profile.
///
/// The stored credential is kept when `password` is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeUpdate {
    pub employee_id: EmployeeId,
    pub profile: EmployeeProfile,
    pub password: Option<Password>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeDirectory: Send + Sync {
    async fn create_employee(&self, request: NewEmployee) -> Result<Employee, Error>;

    async fn get_employee(&self, employee_id: EmployeeId) -> Result<Employee, Error>;

    async fn list_employees(&self, active_only: bool) -> Result<Vec<Employee>, Error>;

    async fn update_employee(&self, request: EmployeeUpdate) -> Result<Employee, Error>;

    /// Activate or deactivate an employee.
    async fn set_employee_active(
        &self,
        employee_id: EmployeeId,
        active: bool,
    ) -> Result<Employee, Error>;

    /// Delete an employee. Loans keep referring to the removed identifier.
    async fn delete_employee(&self, employee_id: EmployeeId) -> Result<(), Error>;

    /// Verify credentials of an active employee.
    async fn authenticate(&self, credentials: LoginCredentials) -> Result<Employee, Error>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureEmployeeDirectory;

fn employee_not_found(employee_id: EmployeeId) -> Error {
    Error::not_found(format!("employee {employee_id} not found"))
}

#[async_trait]
impl EmployeeDirectory for FixtureEmployeeDirectory {
    async fn create_employee(&self, request: NewEmployee) -> Result<Employee, Error> {
        Ok(Employee::new(request.profile, PasswordHash::new("fixture$")))
    }

    async fn get_employee(&self, employee_id: EmployeeId) -> Result<Employee, Error> {
        Err(employee_not_found(employee_id))
    }

    async fn list_employees(&self, _active_only: bool) -> Result<Vec<Employee>, Error> {
        Ok(Vec::new())
    }

    async fn update_employee(&self, request: EmployeeUpdate) -> Result<Employee, Error> {
        Err(employee_not_found(request.employee_id))
    }

    async fn set_employee_active(
        &self,
        employee_id: EmployeeId,
        _active: bool,
    ) -> Result<Employee, Error> {
        Err(employee_not_found(employee_id))
    }

    async fn delete_employee(&self, employee_id: EmployeeId) -> Result<(), Error> {
        Err(employee_not_found(employee_id))
    }

    async fn authenticate(&self, _credentials: LoginCredentials) -> Result<Employee, Error> {
        Err(Error::unauthorized("invalid credentials"))
    }
}
