//! Employee administration and authentication service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info};

use crate::domain::ports::{
    CredentialHasher, CredentialHasherError, EmployeeDirectory, EmployeeRepository,
    EmployeeRepositoryError, EmployeeUpdate, NewEmployee,
};
use crate::domain::{Employee, EmployeeId, Error, LoginCredentials};

#[derive(Clone)]
pub struct EmployeeService<R, H> {
    repo: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> EmployeeService<R, H> {
    pub fn new(repo: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repo, hasher }
    }
}

fn map_employee_error(err: EmployeeRepositoryError) -> Error {
    match err {
        EmployeeRepositoryError::Connection { message } => {
            error!(%message, "employee repository unavailable");
            Error::service_unavailable("employee repository unavailable")
        }
        EmployeeRepositoryError::Query { message } => {
            error!(%message, "employee repository query failed");
            Error::internal(format!("employee repository error: {message}"))
        }
        EmployeeRepositoryError::Missing { employee_id } => {
            Error::not_found(format!("employee {employee_id} not found"))
        }
        EmployeeRepositoryError::DuplicateEmail { email } => {
            Error::conflict(format!("email {email} is already registered"))
        }
    }
}

fn map_hasher_error(err: CredentialHasherError) -> Error {
    error!(error = %err, "credential hashing failed");
    Error::internal("credential processing failed")
}

fn invalid_credentials() -> Error {
    Error::unauthorized("invalid email or password")
}

impl<R, H> EmployeeService<R, H>
where
    R: EmployeeRepository,
    H: CredentialHasher,
{
    async fn find(&self, employee_id: EmployeeId) -> Result<Employee, Error> {
        self.repo
            .find_by_id(&employee_id)
            .await
            .map_err(map_employee_error)?
            .ok_or_else(|| Error::not_found(format!("employee {employee_id} not found")))
    }
}

#[async_trait]
impl<R, H> EmployeeDirectory for EmployeeService<R, H>
where
    R: EmployeeRepository,
    H: CredentialHasher,
{
    async fn create_employee(&self, request: NewEmployee) -> Result<Employee, Error> {
        let hash = self
            .hasher
            .hash(&request.password)
            .await
            .map_err(map_hasher_error)?;
        let employee = Employee::new(request.profile, hash);
        let stored = self
            .repo
            .insert(&employee)
            .await
            .map_err(map_employee_error)?;
        info!(employee_id = %stored.id(), "employee registered");
        Ok(stored)
    }

    async fn get_employee(&self, employee_id: EmployeeId) -> Result<Employee, Error> {
        self.find(employee_id).await
    }

    async fn list_employees(&self, active_only: bool) -> Result<Vec<Employee>, Error> {
        self.repo
            .list(active_only)
            .await
            .map_err(map_employee_error)
    }

    async fn update_employee(&self, request: EmployeeUpdate) -> Result<Employee, Error> {
        let EmployeeUpdate {
            employee_id,
            profile,
            password,
        } = request;
        let hash = match password {
            Some(password) => Some(
                self.hasher
                    .hash(&password)
                    .await
                    .map_err(map_hasher_error)?,
            ),
            None => None,
        };
        let stored = self
            .repo
            .update_profile(&employee_id, &profile, hash)
            .await
            .map_err(map_employee_error)?;
        info!(%employee_id, "employee updated");
        Ok(stored)
    }

    async fn set_employee_active(
        &self,
        employee_id: EmployeeId,
        active: bool,
    ) -> Result<Employee, Error> {
        let stored = self
            .repo
            .set_active(&employee_id, active)
            .await
            .map_err(map_employee_error)?;
        info!(%employee_id, active, "employee activation changed");
        Ok(stored)
    }

    async fn delete_employee(&self, employee_id: EmployeeId) -> Result<(), Error> {
        self.repo
            .delete(&employee_id)
            .await
            .map_err(map_employee_error)
    }

    async fn authenticate(&self, credentials: LoginCredentials) -> Result<Employee, Error> {
        let Some(employee) = self
            .repo
            .find_by_email(credentials.email())
            .await
            .map_err(map_employee_error)?
        else {
            debug!("login for unknown email");
            return Err(invalid_credentials());
        };

        let matches = self
            .hasher
            .verify(credentials.password(), employee.password_hash())
            .await
            .map_err(map_hasher_error)?;
        if !matches {
            debug!(employee_id = %employee.id(), "login with wrong password");
            return Err(invalid_credentials());
        }
        if !employee.is_active() {
            return Err(Error::unauthorized("employee account is inactive"));
        }
        Ok(employee)
    }
}
