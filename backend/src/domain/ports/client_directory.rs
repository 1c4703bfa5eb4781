//! Driving port for client reference data.

use async_trait::async_trait;

use crate::domain::{Client, ClientDraft, ClientId, Error};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClientDirectory: Send + Sync {
    async fn create_client(&self, draft: ClientDraft) -> Result<Client, Error>;

    async fn get_client(&self, client_id: ClientId) -> Result<Client, Error>;

    async fn get_client_by_national_id(&self, national_id: String) -> Result<Client, Error>;

    async fn list_clients(&self) -> Result<Vec<Client>, Error>;

    async fn update_client(
        &self,
        client_id: ClientId,
        draft: ClientDraft,
    ) -> Result<Client, Error>;

    /// Delete a client with no open loans.
    async fn delete_client(&self, client_id: ClientId) -> Result<(), Error>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureClientDirectory;

#[async_trait]
impl ClientDirectory for FixtureClientDirectory {
    async fn create_client(&self, draft: ClientDraft) -> Result<Client, Error> {
        Client::new(draft).map_err(|err| Error::invalid_request(err.to_string()))
    }

    async fn get_client(&self, client_id: ClientId) -> Result<Client, Error> {
        Err(Error::not_found(format!("client {client_id} not found")))
    }

    async fn get_client_by_national_id(&self, national_id: String) -> Result<Client, Error> {
        Err(Error::not_found(format!(
            "client with national id {national_id} not found"
        )))
    }

    async fn list_clients(&self) -> Result<Vec<Client>, Error> {
        Ok(Vec::new())
    }

    async fn update_client(
        &self,
        client_id: ClientId,
        _draft: ClientDraft,
    ) -> Result<Client, Error> {
        Err(Error::not_found(format!("client {client_id} not found")))
    }

    async fn delete_client(&self, client_id: ClientId) -> Result<(), Error> {
        Err(Error::not_found(format!("client {client_id} not found")))
    }
}
