use std::sync::Arc;

use crate::contract::model::{Client, ClientPatch, NewClient};
use crate::domain::error::DomainError;
use crate::domain::events::ClientDomainEvent;
use crate::domain::ports::EventPublisher;
use crate::domain::repo::ClientsRepository;
use crate::domain::validation;
use chrono::Utc;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// Domain service with business rules for client management.
/// Depends only on the repository port, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn ClientsRepository>,
    events: Arc<dyn EventPublisher<ClientDomainEvent>>,
    config: ServiceConfig,
}

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_page_size: 50,
            max_page_size: 1000,
        }
    }
}

fn storage_err(e: anyhow::Error) -> DomainError {
    let message = format!("{e:#}");
    error!(error = %message, "Storage operation failed");
    DomainError::storage(message)
}

impl Service {
    /// Create a service with dependencies.
    pub fn new(
        repo: Arc<dyn ClientsRepository>,
        events: Arc<dyn EventPublisher<ClientDomainEvent>>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            repo,
            events,
            config,
        }
    }

    #[instrument(name = "clients_info.service.get_client", skip(self), fields(client_id = %id))]
    pub async fn get_client(&self, id: Uuid) -> Result<Client, DomainError> {
        debug!("Getting client by id");

        let client = self
            .repo
            .find_by_id(id)
            .await
            .map_err(storage_err)?
            .ok_or_else(|| DomainError::client_not_found(id))?;
        debug!("Successfully retrieved client");
        Ok(client)
    }

    #[instrument(name = "clients_info.service.list_clients", skip(self))]
    pub async fn list_clients(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<Client>, DomainError> {
        let limit = self.effective_limit(limit);
        let offset = offset.unwrap_or(0);
        debug!(limit, offset, "Listing clients");

        let clients = self.repo.list(limit, offset).await.map_err(storage_err)?;

        debug!("Listed {} clients", clients.len());
        Ok(clients)
    }

    #[instrument(name = "clients_info.service.count_clients", skip(self))]
    pub async fn count_clients(&self) -> Result<u64, DomainError> {
        self.repo.count().await.map_err(storage_err)
    }

    #[instrument(name = "clients_info.service.create_client", skip(self, new_client))]
    pub async fn create_client(&self, new_client: NewClient) -> Result<Client, DomainError> {
        info!("Creating new client");

        let client = validation::build_client(Uuid::new_v4(), &new_client, Utc::now())
            .inspect_err(|e| warn!(error = %e, "Rejected new client"))?;

        self.repo
            .insert(client.clone())
            .await
            .map_err(storage_err)?;

        self.events.publish(&ClientDomainEvent::Created {
            id: client.id,
            at: client.created_at,
        });

        info!(client_id = %client.id, "Successfully created client");
        Ok(client)
    }

    #[instrument(
        name = "clients_info.service.update_client",
        skip(self, patch),
        fields(client_id = %id)
    )]
    pub async fn update_client(&self, id: Uuid, patch: ClientPatch) -> Result<Client, DomainError> {
        info!("Updating client");

        let current = self.get_client(id).await?;

        let next = validation::apply_patch(&current, &patch, Utc::now())
            .inspect_err(|e| warn!(error = %e, "Rejected client update"))?;

        let replaced = self
            .repo
            .update(next.clone())
            .await
            .map_err(storage_err)?;
        if !replaced {
            // Deleted between load and write.
            return Err(DomainError::client_not_found(id));
        }

        self.events.publish(&ClientDomainEvent::Updated {
            id: next.id,
            at: next.updated_at,
        });

        info!("Successfully updated client");
        Ok(next)
    }

    #[instrument(
        name = "clients_info.service.delete_client",
        skip(self),
        fields(client_id = %id)
    )]
    pub async fn delete_client(&self, id: Uuid) -> Result<(), DomainError> {
        info!("Deleting client");

        let deleted = self.repo.delete(id).await.map_err(storage_err)?;
        if !deleted {
            return Err(DomainError::client_not_found(id));
        }

        self.events
            .publish(&ClientDomainEvent::Deleted { id, at: Utc::now() });

        info!("Successfully deleted client");
        Ok(())
    }

    fn effective_limit(&self, requested: Option<u32>) -> u32 {
        let max = self.config.max_page_size.max(1);
        requested
            .unwrap_or(self.config.default_page_size)
            .clamp(1, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::TracingEventPublisher;
    use crate::infra::storage::memory_repo::InMemoryClientsRepository;

    fn service(config: ServiceConfig) -> Service {
        Service::new(
            Arc::new(InMemoryClientsRepository::new()),
            Arc::new(TracingEventPublisher),
            config,
        )
    }

    #[test]
    fn limit_defaults_and_clamps() {
        let svc = service(ServiceConfig {
            default_page_size: 20,
            max_page_size: 100,
        });
        assert_eq!(svc.effective_limit(None), 20);
        assert_eq!(svc.effective_limit(Some(0)), 1);
        assert_eq!(svc.effective_limit(Some(5000)), 100);
        assert_eq!(svc.effective_limit(Some(42)), 42);
    }

    #[test]
    fn limit_handles_degenerate_config() {
        let svc = service(ServiceConfig {
            default_page_size: 0,
            max_page_size: 0,
        });
        assert_eq!(svc.effective_limit(None), 1);
    }
}
