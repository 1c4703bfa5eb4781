//! Port for client persistence.

use async_trait::async_trait;

use crate::domain::{Client, ClientId, NationalId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by client repository adapters.
    pub enum ClientRepositoryError {
        Connection { message: String } => "client repository connection failed: {message}",
        Query { message: String } => "client repository query failed: {message}",
        Missing { client_id: ClientId } => "client {client_id} not found",
        /// Another client already uses this national ID.
        DuplicateNationalId { national_id: String } =>
            "national id {national_id} is already registered",
        /// Open loans still reference the client.
        HasOpenLoans { client_id: ClientId } => "client {client_id} has open loans",
    }
}

/// Keyed store for clients.
///
/// National IDs are unique; adapters enforce this on insert and on update,
/// ignoring the record being updated.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn insert(&self, client: &Client) -> Result<Client, ClientRepositoryError>;

    async fn update(&self, client: &Client) -> Result<Client, ClientRepositoryError>;

    async fn find_by_id(
        &self,
        client_id: &ClientId,
    ) -> Result<Option<Client>, ClientRepositoryError>;

    async fn find_by_national_id(
        &self,
        national_id: &NationalId,
    ) -> Result<Option<Client>, ClientRepositoryError>;

    async fn list(&self) -> Result<Vec<Client>, ClientRepositoryError>;

    /// Remove a client with no open loans.
    async fn delete(&self, client_id: &ClientId) -> Result<(), ClientRepositoryError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureClientRepository;

#[async_trait]
impl ClientRepository for FixtureClientRepository {
    async fn insert(&self, client: &Client) -> Result<Client, ClientRepositoryError> {
        Ok(client.clone())
    }

    async fn update(&self, client: &Client) -> Result<Client, ClientRepositoryError> {
        Err(ClientRepositoryError::missing(client.id()))
    }

    async fn find_by_id(
        &self,
        _client_id: &ClientId,
    ) -> Result<Option<Client>, ClientRepositoryError> {
        Ok(None)
    }

    async fn find_by_national_id(
        &self,
        _national_id: &NationalId,
    ) -> Result<Option<Client>, ClientRepositoryError> {
        Ok(None)
    }

    async fn list(&self) -> Result<Vec<Client>, ClientRepositoryError> {
        Ok(Vec::new())
    }

    async fn delete(&self, client_id: &ClientId) -> Result<(), ClientRepositoryError> {
        Err(ClientRepositoryError::missing(*client_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn duplicate_national_id_formats_value() {
        let err = ClientRepositoryError::duplicate_national_id("12345678901");
        assert_eq!(
            err.to_string(),
            "national id 12345678901 is already registered"
        );
    }

    #[tokio::test]
    async fn fixture_list_is_empty() {
        let repo = FixtureClientRepository;
        assert!(repo.list().await.expect("list succeeds").is_empty());
    }
}
