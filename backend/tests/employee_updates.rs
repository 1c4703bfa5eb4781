//! Employee edits racing activation changes over one store.

mod support;

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Notify;

use library_backend::domain::ports::{
    CredentialHasher, CredentialHasherError, EmployeeDirectory, EmployeeUpdate,
    FixtureCredentialHasher, LoanCommand, OpenLoanRequest,
};
use library_backend::domain::{
    EmployeeProfile, EmployeeService, ErrorCode, Password, PasswordHash,
};
use support::{Library, Store, national_id};

/// Hashes like the fixture hasher, but parks until released so a
/// concurrent write can land mid-update.
#[derive(Default)]
struct GatedHasher {
    started: Notify,
    release: Notify,
}

#[async_trait]
impl CredentialHasher for GatedHasher {
    async fn hash(&self, password: &Password) -> Result<PasswordHash, CredentialHasherError> {
        self.started.notify_one();
        self.release.notified().await;
        FixtureCredentialHasher.hash(password).await
    }

    async fn verify(
        &self,
        password: &Password,
        digest: &PasswordHash,
    ) -> Result<bool, CredentialHasherError> {
        FixtureCredentialHasher.verify(password, digest).await
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn deactivation_during_a_password_change_sticks() {
    let library = Library::new();
    let employee_id = library.employee("ana@library.org").await;
    let hasher = Arc::new(GatedHasher::default());
    let employees = Arc::new(EmployeeService::<Store, GatedHasher>::new(
        library.store.clone(),
        hasher.clone(),
    ));

    let update = tokio::spawn({
        let employees = Arc::clone(&employees);
        async move {
            employees
                .update_employee(EmployeeUpdate {
                    employee_id,
                    profile: EmployeeProfile::new("Ana Souza", "ana@library.org")
                        .expect("valid profile"),
                    password: Some(Password::new("rotated").expect("valid password")),
                })
                .await
        }
    });

    hasher.started.notified().await;
    let deactivated = employees
        .set_employee_active(employee_id, false)
        .await
        .expect("deactivate");
    assert!(!deactivated.is_active());
    hasher.release.notify_one();

    let updated = update
        .await
        .expect("task completes")
        .expect("update succeeds");
    assert!(!updated.is_active());
    assert_eq!(updated.name(), "Ana Souza");
    assert_eq!(updated.password_hash().as_str(), "fixture$rotated");

    let stored = employees
        .get_employee(employee_id)
        .await
        .expect("employee exists");
    assert!(!stored.is_active());

    let book = library.book("Dom Casmurro").await;
    let client = library.client(&national_id(1)).await;
    let err = library
        .loans
        .open_loan(OpenLoanRequest {
            client_id: client,
            book_id: book,
            employee_id,
        })
        .await
        .expect_err("inactive staff cannot lend");
    assert_eq!(err.code(), ErrorCode::InvalidState);
    assert!(library.is_available(book).await);
}

#[tokio::test]
async fn activation_change_keeps_profile_edits() {
    let library = Library::new();
    let employee_id = library.employee("bruno@library.org").await;

    library
        .employees
        .update_employee(EmployeeUpdate {
            employee_id,
            profile: EmployeeProfile::new("Bruno Reis", "bruno.reis@library.org")
                .expect("valid profile"),
            password: None,
        })
        .await
        .expect("update");
    let reactivated = library
        .employees
        .set_employee_active(employee_id, true)
        .await
        .expect("activate");

    assert_eq!(reactivated.name(), "Bruno Reis");
    assert_eq!(reactivated.email().as_str(), "bruno.reis@library.org");
    assert_eq!(reactivated.password_hash().as_str(), "fixture$pw");
}
