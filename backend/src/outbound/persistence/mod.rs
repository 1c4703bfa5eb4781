//! In-process persistence adapters.
//!
//! One [`InMemoryLibraryStore`] implements every repository port over a
//! shared, lock-guarded table set:
//!
//! - **Thin adapters**: each `memory_*` module only translates port calls
//!   into table reads and writes. Business rules stay in the services.
//! - **Atomic commits**: the loan commits re-check their preconditions under
//!   the write lock, so the loan row and the book availability flag change
//!   together.
//! - **Stable ordering**: rows are listed in insertion order.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use library_backend::domain::CatalogueService;
//! use library_backend::outbound::persistence::InMemoryLibraryStore;
//!
//! let store = Arc::new(InMemoryLibraryStore::new());
//! let catalogue = CatalogueService::new(store.clone(), store);
//! # let _ = catalogue;
//! ```

mod memory_book_repository;
mod memory_category_repository;
mod memory_client_repository;
mod memory_employee_repository;
mod memory_loan_repository;
mod memory_store;

pub use memory_store::InMemoryLibraryStore;
