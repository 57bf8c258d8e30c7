use async_trait::async_trait;
use uuid::Uuid;

use crate::contract::{
    error::ClientsInfoError,
    model::{Client, ClientPatch, NewClient},
};

/// Public API trait for the clients_info module that other modules can use
#[async_trait]
pub trait ClientsApi: Send + Sync {
    /// Get a client by ID
    async fn get_client(&self, id: Uuid) -> Result<Client, ClientsInfoError>;

    /// List clients ordered by creation time
    async fn list_clients(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<Client>, ClientsInfoError>;

    /// Number of stored clients
    async fn count_clients(&self) -> Result<u64, ClientsInfoError>;

    /// Validate and store a new client
    async fn create_client(&self, new_client: NewClient) -> Result<Client, ClientsInfoError>;

    /// Update a client with partial data
    async fn update_client(
        &self,
        id: Uuid,
        patch: ClientPatch,
    ) -> Result<Client, ClientsInfoError>;

    /// Delete a client by ID
    async fn delete_client(&self, id: Uuid) -> Result<(), ClientsInfoError>;
}
