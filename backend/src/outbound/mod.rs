//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: the in-process library store behind every repository
//!   port
//! - **credentials**: bcrypt hashing for employee passwords
//!
//! Adapters translate between domain types and their storage representation.
//! They contain no business logic.

pub mod credentials;
pub mod persistence;
