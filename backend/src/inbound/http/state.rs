//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on driving ports and remain testable without a store.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    BookCatalogue, BookRepository, CategoryAssociationRepository, CategoryDirectory,
    CategoryRepository, ClientDirectory, ClientRepository, CredentialHasher, EmployeeDirectory,
    EmployeeRepository, FixtureBookCatalogue, FixtureCategoryDirectory, FixtureClientDirectory,
    FixtureEmployeeDirectory, FixtureLoanCommand, FixtureLoanQuery, LoanCommand, LoanQuery,
    LoanRepository,
};
use crate::domain::{
    CatalogueService, CategoryService, ClientService, EmployeeService, LoanService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub loans: Arc<dyn LoanCommand>,
    pub loans_query: Arc<dyn LoanQuery>,
    pub books: Arc<dyn BookCatalogue>,
    pub categories: Arc<dyn CategoryDirectory>,
    pub clients: Arc<dyn ClientDirectory>,
    pub employees: Arc<dyn EmployeeDirectory>,
}

impl HttpState {
    /// Wire every service over one store implementing all repositories.
    ///
    /// Sharing the store keeps loan commits and book availability under the
    /// same lock.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use library_backend::domain::ports::FixtureCredentialHasher;
    /// use library_backend::inbound::http::state::HttpState;
    /// use library_backend::outbound::persistence::InMemoryLibraryStore;
    ///
    /// let state = HttpState::from_store(
    ///     Arc::new(InMemoryLibraryStore::new()),
    ///     Arc::new(FixtureCredentialHasher),
    ///     Arc::new(mockable::DefaultClock),
    /// );
    /// let _loans = state.loans.clone();
    /// ```
    pub fn from_store<S, H>(store: Arc<S>, hasher: Arc<H>, clock: Arc<dyn Clock>) -> Self
    where
        S: LoanRepository
            + BookRepository
            + ClientRepository
            + EmployeeRepository
            + CategoryRepository
            + CategoryAssociationRepository
            + 'static,
        H: CredentialHasher + 'static,
    {
        let loans = Arc::new(LoanService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            clock,
        ));
        Self {
            loans: loans.clone(),
            loans_query: loans,
            books: Arc::new(CatalogueService::new(store.clone(), store.clone())),
            categories: Arc::new(CategoryService::new(store.clone())),
            clients: Arc::new(ClientService::new(store.clone())),
            employees: Arc::new(EmployeeService::new(store, hasher)),
        }
    }

    /// State backed entirely by fixture ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use library_backend::domain::ports::FixtureLoanQuery;
    /// use library_backend::inbound::http::state::HttpState;
    ///
    /// let state = HttpState {
    ///     loans_query: Arc::new(FixtureLoanQuery),
    ///     ..HttpState::fixtures()
    /// };
    /// let _books = state.books.clone();
    /// ```
    pub fn fixtures() -> Self {
        Self {
            loans: Arc::new(FixtureLoanCommand),
            loans_query: Arc::new(FixtureLoanQuery),
            books: Arc::new(FixtureBookCatalogue),
            categories: Arc::new(FixtureCategoryDirectory),
            clients: Arc::new(FixtureClientDirectory),
            employees: Arc::new(FixtureEmployeeDirectory),
        }
    }
}
