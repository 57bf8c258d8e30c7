//! Domain service behavior over the in-memory store, including the spans
//! and events it emits.

use std::sync::Arc;

use anyhow::Context;
use parking_lot::Mutex;
use tracing_test::traced_test;
use uuid::Uuid;

use clients_info::config::{ClientsInfoConfig, StorageKind};
use clients_info::contract::model::{Client, ClientField, ClientPatch, NewClient};
use clients_info::contract::schema::{ClientSchema, CLIENT_SCHEMA};
use clients_info::contract::ClientsInfoError;
use clients_info::domain::error::DomainError;
use clients_info::domain::events::ClientDomainEvent;
use clients_info::domain::ports::EventPublisher;
use clients_info::domain::repo::ClientsRepository;
use clients_info::domain::service::{Service, ServiceConfig};
use clients_info::infra::storage::InMemoryClientsRepository;
use clients_info::ClientsInfo;

#[derive(Default)]
struct RecordingPublisher {
    events: Mutex<Vec<ClientDomainEvent>>,
}

impl RecordingPublisher {
    fn kinds(&self) -> Vec<&'static str> {
        self.events.lock().iter().map(|e| e.kind()).collect()
    }
}

impl EventPublisher<ClientDomainEvent> for RecordingPublisher {
    fn publish(&self, event: &ClientDomainEvent) {
        self.events.lock().push(event.clone());
    }
}

async fn setup() -> (Service, Arc<RecordingPublisher>) {
    let repo = Arc::new(InMemoryClientsRepository::new());
    repo.register_schema(&CLIENT_SCHEMA).await.unwrap();
    let events = Arc::new(RecordingPublisher::default());
    let service = Service::new(repo, events.clone(), ServiceConfig::default());
    (service, events)
}

fn ada() -> NewClient {
    NewClient {
        name: " Ada ".to_string(),
        email: "ADA@X.COM".to_string(),
        phone: "555-0100".to_string(),
        location: "NYC".to_string(),
    }
}

#[traced_test]
#[tokio::test]
async fn create_client_normalizes_and_emits_spans() {
    let (service, events) = setup().await;

    let client = service.create_client(ada()).await.unwrap();

    assert_eq!(client.name, "Ada");
    assert_eq!(client.email, "ada@x.com");
    assert_eq!(client.created_at, client.updated_at);
    assert_eq!(events.kinds(), ["created"]);

    assert!(logs_contain("clients_info.service.create_client"));
    assert!(logs_contain("Successfully created client"));
}

#[traced_test]
#[tokio::test]
async fn invalid_client_is_rejected_before_storage() {
    let (service, events) = setup().await;

    let err = service
        .create_client(NewClient {
            name: "  ".to_string(),
            email: String::new(),
            ..ada()
        })
        .await
        .unwrap_err();

    match err {
        DomainError::Validation(v) => {
            assert_eq!(v.fields(), &[ClientField::Name, ClientField::Email])
        }
        other => panic!("Expected Validation error, got {other:?}"),
    }
    assert!(service.list_clients(None, None).await.unwrap().is_empty());
    assert!(events.kinds().is_empty());
    assert!(logs_contain("Rejected new client"));
}

#[traced_test]
#[tokio::test]
async fn update_preserves_created_at_and_refreshes_updated_at() {
    let (service, events) = setup().await;
    let created = service.create_client(ada()).await.unwrap();

    let updated = service
        .update_client(
            created.id,
            ClientPatch {
                email: Some(" Grace@Navy.MIL ".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.email, "grace@navy.mil");
    assert_eq!(updated.name, "Ada");
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);

    let touched = service
        .update_client(created.id, ClientPatch::default())
        .await
        .unwrap();
    assert!(touched.updated_at > updated.updated_at);

    let stored = service.get_client(created.id).await.unwrap();
    assert_eq!(stored, touched);
    assert_eq!(events.kinds(), ["created", "updated", "updated"]);
    assert!(logs_contain("clients_info.service.update_client"));
}

#[traced_test]
#[tokio::test]
async fn rejected_update_leaves_record_untouched() {
    let (service, _events) = setup().await;
    let created = service.create_client(ada()).await.unwrap();

    let err = service
        .update_client(
            created.id,
            ClientPatch {
                location: Some("\t".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    assert_eq!(service.get_client(created.id).await.unwrap(), created);
}

#[traced_test]
#[tokio::test]
async fn missing_client_is_not_found() {
    let (service, _events) = setup().await;
    let id = Uuid::new_v4();

    assert!(matches!(
        service.get_client(id).await,
        Err(DomainError::ClientNotFound { id: missing }) if missing == id
    ));
    assert!(matches!(
        service.update_client(id, ClientPatch::default()).await,
        Err(DomainError::ClientNotFound { .. })
    ));
    assert!(matches!(
        service.delete_client(id).await,
        Err(DomainError::ClientNotFound { .. })
    ));
}

#[traced_test]
#[tokio::test]
async fn delete_then_list() {
    let (service, events) = setup().await;
    let a = service.create_client(ada()).await.unwrap();
    let b = service
        .create_client(NewClient {
            name: "Bob".to_string(),
            email: "bob@x.com".to_string(),
            ..ada()
        })
        .await
        .unwrap();

    service.delete_client(a.id).await.unwrap();

    let remaining = service.list_clients(Some(10), None).await.unwrap();
    assert_eq!(remaining, vec![b]);
    assert_eq!(events.kinds(), ["created", "created", "deleted"]);
    assert!(logs_contain("Successfully deleted client"));
}

/// Store that accepts the schema but fails every data operation.
struct ReadOnlyStore;

#[async_trait::async_trait]
impl ClientsRepository for ReadOnlyStore {
    async fn register_schema(&self, _schema: &ClientSchema) -> anyhow::Result<()> {
        Ok(())
    }
    async fn find_by_id(&self, _id: Uuid) -> anyhow::Result<Option<Client>> {
        Ok(None)
    }
    async fn insert(&self, _c: Client) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("attempt to write a readonly database")).context("insert client")
    }
    async fn update(&self, _c: Client) -> anyhow::Result<bool> {
        anyhow::bail!("attempt to write a readonly database")
    }
    async fn delete(&self, _id: Uuid) -> anyhow::Result<bool> {
        anyhow::bail!("attempt to write a readonly database")
    }
    async fn list(&self, _limit: u32, _offset: u32) -> anyhow::Result<Vec<Client>> {
        Ok(Vec::new())
    }
    async fn count(&self) -> anyhow::Result<u64> {
        anyhow::bail!("database is locked")
    }
}

#[traced_test]
#[tokio::test]
async fn storage_failure_keeps_its_cause() {
    let module = ClientsInfo::new();
    module
        .init_with(
            &ClientsInfoConfig {
                storage: StorageKind::Memory,
                ..Default::default()
            },
            Arc::new(ReadOnlyStore),
            Arc::new(RecordingPublisher::default()),
        )
        .await
        .unwrap();
    let api = module.api().unwrap();

    let err = api.create_client(ada()).await.unwrap_err();
    match &err {
        ClientsInfoError::Internal { message } => {
            assert!(message.contains("insert client"), "message: {message}");
            assert!(message.contains("readonly database"), "message: {message}");
        }
        other => panic!("Expected Internal error, got {other:?}"),
    }
    assert!(err.to_string().contains("readonly database"));

    assert!(logs_contain("Storage operation failed"));
    assert!(logs_contain("readonly database"));

    let err = api.count_clients().await.unwrap_err();
    assert!(err.to_string().contains("database is locked"));
    assert!(logs_contain("database is locked"));
}
