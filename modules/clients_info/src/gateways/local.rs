use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::contract::{
    client::ClientsApi,
    error::ClientsInfoError,
    model::{Client, ClientPatch, NewClient},
};
use crate::domain::service::Service;

/// Local implementation of the ClientsApi trait that delegates to the domain service
pub struct ClientsLocalClient {
    service: Arc<Service>,
}

impl ClientsLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ClientsApi for ClientsLocalClient {
    async fn get_client(&self, id: Uuid) -> Result<Client, ClientsInfoError> {
        self.service.get_client(id).await.map_err(Into::into)
    }

    async fn list_clients(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<Client>, ClientsInfoError> {
        self.service
            .list_clients(limit, offset)
            .await
            .map_err(Into::into)
    }

    async fn count_clients(&self) -> Result<u64, ClientsInfoError> {
        self.service.count_clients().await.map_err(Into::into)
    }

    async fn create_client(&self, new_client: NewClient) -> Result<Client, ClientsInfoError> {
        self.service
            .create_client(new_client)
            .await
            .map_err(Into::into)
    }

    async fn update_client(
        &self,
        id: Uuid,
        patch: ClientPatch,
    ) -> Result<Client, ClientsInfoError> {
        self.service
            .update_client(id, patch)
            .await
            .map_err(Into::into)
    }

    async fn delete_client(&self, id: Uuid) -> Result<(), ClientsInfoError> {
        self.service.delete_client(id).await.map_err(Into::into)
    }
}
