//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`CredentialHasher`]) are implemented by
//! outbound adapters. Driving ports ([`LoanCommand`], [`LoanQuery`],
//! [`BookCatalogue`] and the directories) are implemented by domain services
//! and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod book_catalogue;
mod book_repository;
mod category_association_repository;
mod category_directory;
mod category_repository;
mod client_directory;
mod client_repository;
mod credential_hasher;
mod employee_directory;
mod employee_repository;
mod loan_command;
mod loan_query;
mod loan_repository;

#[cfg(test)]
pub use book_catalogue::MockBookCatalogue;
pub use book_catalogue::{
    BookCatalogue, CreateBookRequest, FixtureBookCatalogue, UpdateBookRequest,
};
#[cfg(test)]
pub use book_repository::MockBookRepository;
pub use book_repository::{BookRepository, BookRepositoryError, FixtureBookRepository};
#[cfg(test)]
pub use category_association_repository::MockCategoryAssociationRepository;
pub use category_association_repository::{
    CategoryAssociationError, CategoryAssociationRepository,
    FixtureCategoryAssociationRepository,
};
#[cfg(test)]
pub use category_directory::MockCategoryDirectory;
pub use category_directory::{CategoryDirectory, FixtureCategoryDirectory};
#[cfg(test)]
pub use category_repository::MockCategoryRepository;
pub use category_repository::{
    CategoryRepository, CategoryRepositoryError, FixtureCategoryRepository,
};
#[cfg(test)]
pub use client_directory::MockClientDirectory;
pub use client_directory::{ClientDirectory, FixtureClientDirectory};
#[cfg(test)]
pub use client_repository::MockClientRepository;
pub use client_repository::{ClientRepository, ClientRepositoryError, FixtureClientRepository};
#[cfg(test)]
pub use credential_hasher::MockCredentialHasher;
pub use credential_hasher::{CredentialHasher, CredentialHasherError, FixtureCredentialHasher};
#[cfg(test)]
pub use employee_directory::MockEmployeeDirectory;
pub use employee_directory::{
    EmployeeDirectory, EmployeeUpdate, FixtureEmployeeDirectory, NewEmployee,
};
#[cfg(test)]
pub use employee_repository::MockEmployeeRepository;
pub use employee_repository::{
    EmployeeRepository, EmployeeRepositoryError, FixtureEmployeeRepository,
};
#[cfg(test)]
pub use loan_command::MockLoanCommand;
pub use loan_command::{CloseLoanRequest, FixtureLoanCommand, LoanCommand, OpenLoanRequest};
#[cfg(test)]
pub use loan_query::MockLoanQuery;
pub use loan_query::{FixtureLoanQuery, LoanListing, LoanQuery};
#[cfg(test)]
pub use loan_repository::MockLoanRepository;
pub use loan_repository::{FixtureLoanRepository, LoanRepository, LoanRepositoryError};
