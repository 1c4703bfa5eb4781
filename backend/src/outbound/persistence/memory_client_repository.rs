//! In-memory [`ClientRepository`] adapter.

use async_trait::async_trait;

use crate::domain::ports::{ClientRepository, ClientRepositoryError};
use crate::domain::{Client, ClientId, NationalId};

use super::InMemoryLibraryStore;
use super::memory_store::LibraryTables;

fn national_id_taken(tables: &LibraryTables, client: &Client) -> bool {
    tables
        .clients
        .values()
        .any(|other| other.id() != client.id() && other.national_id() == client.national_id())
}

#[async_trait]
impl ClientRepository for InMemoryLibraryStore {
    async fn insert(&self, client: &Client) -> Result<Client, ClientRepositoryError> {
        self.write(ClientRepositoryError::query, |tables| {
            if national_id_taken(tables, client) {
                return Err(ClientRepositoryError::duplicate_national_id(
                    client.national_id().as_str(),
                ));
            }
            let key = tables.allocate_key();
            let mut row = client.clone();
            row.assign_key(key);
            tables.clients.insert(key, row.id(), row.clone());
            Ok(row)
        })
    }

    async fn update(&self, client: &Client) -> Result<Client, ClientRepositoryError> {
        self.write(ClientRepositoryError::query, |tables| {
            let key = tables
                .clients
                .key_of(&client.id())
                .ok_or_else(|| ClientRepositoryError::missing(client.id()))?;
            if national_id_taken(tables, client) {
                return Err(ClientRepositoryError::duplicate_national_id(
                    client.national_id().as_str(),
                ));
            }
            let mut row = client.clone();
            row.assign_key(key);
            tables.clients.insert(key, row.id(), row.clone());
            Ok(row)
        })
    }

    async fn find_by_id(
        &self,
        client_id: &ClientId,
    ) -> Result<Option<Client>, ClientRepositoryError> {
        self.read(ClientRepositoryError::query, |tables| {
            Ok(tables.clients.get(client_id).cloned())
        })
    }

    async fn find_by_national_id(
        &self,
        national_id: &NationalId,
    ) -> Result<Option<Client>, ClientRepositoryError> {
        self.read(ClientRepositoryError::query, |tables| {
            Ok(tables
                .clients
                .values()
                .find(|client| client.national_id() == national_id)
                .cloned())
        })
    }

    async fn list(&self) -> Result<Vec<Client>, ClientRepositoryError> {
        self.read(ClientRepositoryError::query, |tables| {
            Ok(tables.clients.values().cloned().collect())
        })
    }

    async fn delete(&self, client_id: &ClientId) -> Result<(), ClientRepositoryError> {
        self.write(ClientRepositoryError::query, |tables| {
            if !tables.clients.contains(client_id) {
                return Err(ClientRepositoryError::missing(*client_id));
            }
            if tables.open_loan_count_for_client(client_id) > 0 {
                return Err(ClientRepositoryError::has_open_loans(*client_id));
            }
            tables.clients.remove(client_id);
            Ok(())
        })
    }
}
