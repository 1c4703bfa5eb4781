//! Client reference-data service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::domain::ports::{ClientDirectory, ClientRepository, ClientRepositoryError};
use crate::domain::{Client, ClientDraft, ClientId, Error, NationalId};

#[derive(Clone)]
pub struct ClientService<R> {
    repo: Arc<R>,
}

impl<R> ClientService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

fn map_client_error(err: ClientRepositoryError) -> Error {
    match err {
        ClientRepositoryError::Connection { message } => {
            error!(%message, "client repository unavailable");
            Error::service_unavailable("client repository unavailable")
        }
        ClientRepositoryError::Query { message } => {
            error!(%message, "client repository query failed");
            Error::internal(format!("client repository error: {message}"))
        }
        ClientRepositoryError::Missing { client_id } => {
            Error::not_found(format!("client {client_id} not found"))
        }
        ClientRepositoryError::DuplicateNationalId { national_id } => {
            Error::conflict(format!("national id {national_id} is already registered"))
        }
        ClientRepositoryError::HasOpenLoans { client_id } => {
            Error::dependency_violation(format!("client {client_id} has open loans"))
        }
    }
}

#[async_trait]
impl<R> ClientDirectory for ClientService<R>
where
    R: ClientRepository,
{
    async fn create_client(&self, draft: ClientDraft) -> Result<Client, Error> {
        let client = Client::new(draft).map_err(|err| Error::invalid_request(err.to_string()))?;
        let stored = self.repo.insert(&client).await.map_err(map_client_error)?;
        info!(client_id = %stored.id(), "client registered");
        Ok(stored)
    }

    async fn get_client(&self, client_id: ClientId) -> Result<Client, Error> {
        self.repo
            .find_by_id(&client_id)
            .await
            .map_err(map_client_error)?
            .ok_or_else(|| Error::not_found(format!("client {client_id} not found")))
    }

    async fn get_client_by_national_id(&self, national_id: String) -> Result<Client, Error> {
        let national_id =
            NationalId::new(&national_id).map_err(|err| Error::invalid_request(err.to_string()))?;
        self.repo
            .find_by_national_id(&national_id)
            .await
            .map_err(map_client_error)?
            .ok_or_else(|| {
                Error::not_found(format!("client with national id {national_id} not found"))
            })
    }

    async fn list_clients(&self) -> Result<Vec<Client>, Error> {
        self.repo.list().await.map_err(map_client_error)
    }

    async fn update_client(
        &self,
        client_id: ClientId,
        draft: ClientDraft,
    ) -> Result<Client, Error> {
        let client = Client::with_id(client_id, draft)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        self.repo.update(&client).await.map_err(map_client_error)
    }

    async fn delete_client(&self, client_id: ClientId) -> Result<(), Error> {
        self.repo
            .delete(&client_id)
            .await
            .map_err(map_client_error)?;
        info!(%client_id, "client removed");
        Ok(())
    }
}
