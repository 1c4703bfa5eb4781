//! Shared wiring for integration tests: real services over one in-memory
//! store, a pinned clock and the fixture credential hasher.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use library_backend::domain::ports::{
    BookCatalogue, ClientDirectory, CreateBookRequest, EmployeeDirectory,
    FixtureCredentialHasher, NewEmployee,
};
use library_backend::domain::{
    BookDraft, BookId, CatalogueService, CategoryService, ClientDraft, ClientId, ClientService,
    EmployeeId, EmployeeProfile, EmployeeService, LoanService, Password,
};
use library_backend::outbound::persistence::InMemoryLibraryStore;

pub type Store = InMemoryLibraryStore;
pub type Loans = LoanService<Store, Store, Store, Store>;

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0)
        .single()
        .expect("valid fixed instant")
}

pub struct Library {
    pub store: Arc<Store>,
    pub loans: Arc<Loans>,
    pub catalogue: CatalogueService<Store, Store>,
    pub categories: CategoryService<Store>,
    pub clients: ClientService<Store>,
    pub employees: EmployeeService<Store, FixtureCredentialHasher>,
}

impl Library {
    pub fn new() -> Self {
        Self::at(now())
    }

    pub fn at(instant: DateTime<Utc>) -> Self {
        let store = Arc::new(InMemoryLibraryStore::new());
        Self {
            loans: Arc::new(LoanService::new(
                store.clone(),
                store.clone(),
                store.clone(),
                store.clone(),
                Arc::new(FixedClock(instant)),
            )),
            catalogue: CatalogueService::new(store.clone(), store.clone()),
            categories: CategoryService::new(store.clone()),
            clients: ClientService::new(store.clone()),
            employees: EmployeeService::new(store.clone(), Arc::new(FixtureCredentialHasher)),
            store,
        }
    }

    pub async fn book(&self, title: &str) -> BookId {
        self.catalogue
            .create_book(CreateBookRequest {
                draft: BookDraft {
                    title: title.to_owned(),
                    author: "Machado de Assis".to_owned(),
                    publication_year: None,
                },
                category_ids: Vec::new(),
            })
            .await
            .expect("book created")
            .book
            .id()
    }

    pub async fn client(&self, national_id: &str) -> ClientId {
        self.clients
            .create_client(ClientDraft {
                name: format!("Cliente {national_id}"),
                national_id: national_id.to_owned(),
                phone: None,
                address: None,
            })
            .await
            .expect("client created")
            .id()
    }

    pub async fn employee(&self, email: &str) -> EmployeeId {
        self.employees
            .create_employee(NewEmployee {
                profile: EmployeeProfile::new("Funcionária", email).expect("valid profile"),
                password: Password::new("pw").expect("valid password"),
            })
            .await
            .expect("employee created")
            .id()
    }

    pub async fn is_available(&self, book_id: BookId) -> bool {
        self.catalogue
            .get_book(book_id)
            .await
            .expect("book exists")
            .book
            .is_available()
    }
}

/// Eleven-digit national id derived from `n`.
pub fn national_id(n: usize) -> String {
    format!("{:011}", 10_000_000_000_usize + n)
}
