//! Port for employee persistence.

use async_trait::async_trait;

use crate::domain::{EmailAddress, Employee, EmployeeId, EmployeeProfile, PasswordHash};

use super::define_port_error;

define_port_error! {
    /// Errors raised by employee repository adapters.
    pub enum EmployeeRepositoryError {
        Connection { message: String } => "employee repository connection failed: {message}",
        Query { message: String } => "employee repository query failed: {message}",
        Missing { employee_id: EmployeeId } => "employee {employee_id} not found",
        /// Another employee already uses this email address.
        DuplicateEmail { email: String } => "email {email} is already registered",
    }
}

/// Keyed store for employees. Deletion is unconditional: loans keep their
/// employee reference even after the employee is removed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn insert(&self, employee: &Employee) -> Result<Employee, EmployeeRepositoryError>;

    /// Replace name and email, and the hash when one is given. The active
    /// flag is left as stored.
    async fn update_profile(
        &self,
        employee_id: &EmployeeId,
        profile: &EmployeeProfile,
        password_hash: Option<PasswordHash>,
    ) -> Result<Employee, EmployeeRepositoryError>;

    /// Flip only the active flag.
    async fn set_active(
        &self,
        employee_id: &EmployeeId,
        active: bool,
    ) -> Result<Employee, EmployeeRepositoryError>;

    async fn find_by_id(
        &self,
        employee_id: &EmployeeId,
    ) -> Result<Option<Employee>, EmployeeRepositoryError>;

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Employee>, EmployeeRepositoryError>;

    async fn list(&self, active_only: bool) -> Result<Vec<Employee>, EmployeeRepositoryError>;

    async fn delete(&self, employee_id: &EmployeeId) -> Result<(), EmployeeRepositoryError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureEmployeeRepository;

#[async_trait]
impl EmployeeRepository for FixtureEmployeeRepository {
    async fn insert(&self, employee: &Employee) -> Result<Employee, EmployeeRepositoryError> {
        Ok(employee.clone())
    }

    async fn update_profile(
        &self,
        employee_id: &EmployeeId,
        _profile: &EmployeeProfile,
        _password_hash: Option<PasswordHash>,
    ) -> Result<Employee, EmployeeRepositoryError> {
        Err(EmployeeRepositoryError::missing(*employee_id))
    }

    async fn set_active(
        &self,
        employee_id: &EmployeeId,
        _active: bool,
    ) -> Result<Employee, EmployeeRepositoryError> {
        Err(EmployeeRepositoryError::missing(*employee_id))
    }

    async fn find_by_id(
        &self,
        _employee_id: &EmployeeId,
    ) -> Result<Option<Employee>, EmployeeRepositoryError> {
        Ok(None)
    }

    async fn find_by_email(
        &self,
        _email: &EmailAddress,
    ) -> Result<Option<Employee>, EmployeeRepositoryError> {
        Ok(None)
    }

    async fn list(&self, _active_only: bool) -> Result<Vec<Employee>, EmployeeRepositoryError> {
        Ok(Vec::new())
    }

    async fn delete(&self, employee_id: &EmployeeId) -> Result<(), EmployeeRepositoryError> {
        Err(EmployeeRepositoryError::missing(*employee_id))
    }
}
