//! In-memory [`EmployeeRepository`] adapter.

use async_trait::async_trait;

use crate::domain::ports::{EmployeeRepository, EmployeeRepositoryError};
use crate::domain::{EmailAddress, Employee, EmployeeId, EmployeeProfile, PasswordHash};

use super::InMemoryLibraryStore;
use super::memory_store::LibraryTables;

fn email_taken(tables: &LibraryTables, employee_id: &EmployeeId, email: &EmailAddress) -> bool {
    tables
        .employees
        .values()
        .any(|other| other.id() != *employee_id && other.email() == email)
}

#[async_trait]
impl EmployeeRepository for InMemoryLibraryStore {
    async fn insert(&self, employee: &Employee) -> Result<Employee, EmployeeRepositoryError> {
        self.write(EmployeeRepositoryError::query, |tables| {
            if email_taken(tables, &employee.id(), employee.email()) {
                return Err(EmployeeRepositoryError::duplicate_email(
                    employee.email().as_str(),
                ));
            }
            let key = tables.allocate_key();
            let mut row = employee.clone();
            row.assign_key(key);
            tables.employees.insert(key, row.id(), row.clone());
            Ok(row)
        })
    }

    async fn update_profile(
        &self,
        employee_id: &EmployeeId,
        profile: &EmployeeProfile,
        password_hash: Option<PasswordHash>,
    ) -> Result<Employee, EmployeeRepositoryError> {
        self.write(EmployeeRepositoryError::query, |tables| {
            if !tables.employees.contains(employee_id) {
                return Err(EmployeeRepositoryError::missing(*employee_id));
            }
            if email_taken(tables, employee_id, profile.email()) {
                return Err(EmployeeRepositoryError::duplicate_email(
                    profile.email().as_str(),
                ));
            }
            let row = tables
                .employees
                .get_mut(employee_id)
                .ok_or_else(|| EmployeeRepositoryError::missing(*employee_id))?;
            row.apply_profile(profile.clone());
            if let Some(hash) = password_hash {
                row.set_password_hash(hash);
            }
            Ok(row.clone())
        })
    }

    async fn set_active(
        &self,
        employee_id: &EmployeeId,
        active: bool,
    ) -> Result<Employee, EmployeeRepositoryError> {
        self.write(EmployeeRepositoryError::query, |tables| {
            let row = tables
                .employees
                .get_mut(employee_id)
                .ok_or_else(|| EmployeeRepositoryError::missing(*employee_id))?;
            row.set_active(active);
            Ok(row.clone())
        })
    }

    async fn find_by_id(
        &self,
        employee_id: &EmployeeId,
    ) -> Result<Option<Employee>, EmployeeRepositoryError> {
        self.read(EmployeeRepositoryError::query, |tables| {
            Ok(tables.employees.get(employee_id).cloned())
        })
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Employee>, EmployeeRepositoryError> {
        self.read(EmployeeRepositoryError::query, |tables| {
            Ok(tables
                .employees
                .values()
                .find(|employee| employee.email() == email)
                .cloned())
        })
    }

    async fn list(&self, active_only: bool) -> Result<Vec<Employee>, EmployeeRepositoryError> {
        self.read(EmployeeRepositoryError::query, |tables| {
            Ok(tables
                .employees
                .values()
                .filter(|employee| !active_only || employee.is_active())
                .cloned()
                .collect())
        })
    }

    async fn delete(&self, employee_id: &EmployeeId) -> Result<(), EmployeeRepositoryError> {
        self.write(EmployeeRepositoryError::query, |tables| {
            tables
                .employees
                .remove(employee_id)
                .map(|_| ())
                .ok_or_else(|| EmployeeRepositoryError::missing(*employee_id))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn employee() -> Employee {
        Employee::new(
            EmployeeProfile::new("Ana Lima", "ana@library.org").expect("valid profile"),
            PasswordHash::new("fixture$old"),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn profile_update_leaves_the_active_flag_alone(employee: Employee) {
        let store = InMemoryLibraryStore::new();
        let stored = EmployeeRepository::insert(&store, &employee)
            .await
            .expect("insert");
        store
            .set_active(&stored.id(), false)
            .await
            .expect("deactivate");

        let updated = store
            .update_profile(
                &stored.id(),
                &EmployeeProfile::new("Ana Souza", "ana@library.org").expect("valid profile"),
                Some(PasswordHash::new("fixture$new")),
            )
            .await
            .expect("update");

        assert!(!updated.is_active());
        assert_eq!(updated.name(), "Ana Souza");
        assert_eq!(updated.password_hash().as_str(), "fixture$new");
        assert_eq!(updated.key(), stored.key());
    }

    #[rstest]
    #[tokio::test]
    async fn profile_update_without_hash_keeps_the_credential(employee: Employee) {
        let store = InMemoryLibraryStore::new();
        let stored = EmployeeRepository::insert(&store, &employee)
            .await
            .expect("insert");

        let updated = store
            .update_profile(
                &stored.id(),
                &EmployeeProfile::new("Ana Lima", "ana@library.org").expect("valid profile"),
                None,
            )
            .await
            .expect("update");

        assert_eq!(updated.password_hash().as_str(), "fixture$old");
    }

    #[rstest]
    #[tokio::test]
    async fn profile_update_refuses_another_employees_email(employee: Employee) {
        let store = InMemoryLibraryStore::new();
        let first = EmployeeRepository::insert(&store, &employee)
            .await
            .expect("insert");
        let second = Employee::new(
            EmployeeProfile::new("Bruno Reis", "bruno@library.org").expect("valid profile"),
            PasswordHash::new("fixture$pw"),
        );
        let second = EmployeeRepository::insert(&store, &second)
            .await
            .expect("insert");

        let err = store
            .update_profile(
                &second.id(),
                &EmployeeProfile::new("Bruno Reis", "ANA@library.org").expect("valid profile"),
                None,
            )
            .await
            .expect_err("email taken");

        assert!(matches!(err, EmployeeRepositoryError::DuplicateEmail { .. }));
        let unchanged = store
            .find_by_id(&second.id())
            .await
            .expect("lookup")
            .expect("present");
        assert_eq!(unchanged.email().as_str(), "bruno@library.org");
        assert_ne!(first.id(), second.id());
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_employees_are_reported_missing() {
        let store = InMemoryLibraryStore::new();
        let id = EmployeeId::random();
        let err = store.set_active(&id, false).await.expect_err("missing");
        assert_eq!(err, EmployeeRepositoryError::Missing { employee_id: id });
    }
}
