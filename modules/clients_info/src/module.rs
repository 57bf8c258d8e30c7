use std::sync::Arc;

use anyhow::{anyhow, bail, Context};
use arc_swap::ArcSwapOption;
use sea_orm::DatabaseConnection;
use tracing::{debug, info};

use crate::config::{ClientsInfoConfig, StorageKind};
use crate::contract::client::ClientsApi;
use crate::contract::schema::CLIENT_SCHEMA;
use crate::domain::events::ClientDomainEvent;
use crate::domain::ports::{EventPublisher, TracingEventPublisher};
use crate::domain::repo::ClientsRepository;
use crate::domain::service::Service;
use crate::gateways::local::ClientsLocalClient;
use crate::infra::storage::{InMemoryClientsRepository, SeaOrmClientsRepository};

/// Module handle. Created empty, initialized exactly once at process startup.
#[derive(Default)]
pub struct ClientsInfo {
    // Keep the domain service behind ArcSwap for cheap read-mostly access.
    service: ArcSwapOption<Service>,
}

impl ClientsInfo {
    pub const NAME: &'static str = "clients_info";

    pub fn new() -> Self {
        Self::default()
    }

    /// Wire the store selected by `cfg.storage` and register the client schema.
    /// `db` is required for [`StorageKind::Database`] and ignored otherwise.
    pub async fn init(
        &self,
        cfg: &ClientsInfoConfig,
        db: Option<DatabaseConnection>,
    ) -> anyhow::Result<()> {
        let repo: Arc<dyn ClientsRepository> = match cfg.storage {
            StorageKind::Memory => Arc::new(InMemoryClientsRepository::new()),
            StorageKind::Database => {
                let conn = db.ok_or_else(|| anyhow!("DB required for database storage"))?;
                Arc::new(SeaOrmClientsRepository::new(conn))
            }
        };
        self.init_with(cfg, repo, Arc::new(TracingEventPublisher))
            .await
    }

    /// Initialize with caller-provided collaborators.
    pub async fn init_with(
        &self,
        cfg: &ClientsInfoConfig,
        repo: Arc<dyn ClientsRepository>,
        events: Arc<dyn EventPublisher<ClientDomainEvent>>,
    ) -> anyhow::Result<()> {
        if self.is_initialized() {
            bail!("{} is already initialized", Self::NAME);
        }
        info!(storage = ?cfg.storage, "Initializing clients_info module");
        debug!(
            "Loaded clients_info config: default_page_size={}, max_page_size={}",
            cfg.default_page_size, cfg.max_page_size
        );

        repo.register_schema(&CLIENT_SCHEMA)
            .await
            .context("failed to register clients schema")?;

        let service = Arc::new(Service::new(repo, events, cfg.into()));
        let previous = self
            .service
            .compare_and_swap(&None::<Arc<Service>>, Some(service));
        if previous.is_some() {
            bail!("{} is already initialized", Self::NAME);
        }

        info!("clients_info module ready");
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.service.load().is_some()
    }

    /// In-process client for the module's public API.
    pub fn api(&self) -> anyhow::Result<Arc<dyn ClientsApi>> {
        let service = self
            .service
            .load_full()
            .ok_or_else(|| anyhow!("{} is not initialized", Self::NAME))?;
        Ok(Arc::new(ClientsLocalClient::new(service)))
    }
}
