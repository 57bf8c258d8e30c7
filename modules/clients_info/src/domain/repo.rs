use crate::contract::model::Client;
use crate::contract::schema::ClientSchema;
use async_trait::async_trait;
use uuid::Uuid;

/// Port for the domain layer: persistence operations the domain needs.
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait ClientsRepository: Send + Sync {
    /// Register the record shape with the store. Called once at startup;
    /// registering the same schema again is a no-op.
    async fn register_schema(&self, schema: &ClientSchema) -> anyhow::Result<()>;
    /// Load a client by id.
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Client>>;
    /// Insert a fully-formed domain client.
    ///
    /// Service computes id/timestamps/validation; repo persists.
    async fn insert(&self, c: Client) -> anyhow::Result<()>;
    /// Replace an existing client (by primary key in `c.id`).
    /// Returns false if no such client exists.
    async fn update(&self, c: Client) -> anyhow::Result<bool>;
    /// Delete by id. Returns true if a record was deleted.
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
    /// Page through clients ordered by `created_at` ascending.
    async fn list(&self, limit: u32, offset: u32) -> anyhow::Result<Vec<Client>>;
    /// Total number of stored clients.
    async fn count(&self) -> anyhow::Result<u64>;
}
