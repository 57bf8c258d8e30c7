//! SeaORM-backed repository implementation for the domain port.
//!
//! Registration checks the entity against the schema metadata, then runs
//! the module migrations.

use anyhow::{bail, Context};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityName, EntityTrait, IdenStatic, Iterable,
    PaginatorTrait, QueryOrder, QuerySelect,
};
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};
use uuid::Uuid;

use crate::contract::model::Client;
use crate::contract::schema::ClientSchema;
use crate::domain::repo::ClientsRepository;
use crate::infra::storage::entity::{ActiveModel as ClientAM, Column, Entity as ClientEntity};
use crate::infra::storage::migrations::Migrator;

/// SeaORM repository impl.
/// Holds a pooled connection handle; cloning the handle is cheap.
pub struct SeaOrmClientsRepository {
    conn: DatabaseConnection,
}

impl SeaOrmClientsRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

fn check_entity_matches(schema: &ClientSchema) -> anyhow::Result<()> {
    let entity = ClientEntity;
    let table = entity.table_name();
    if table != schema.collection {
        bail!(
            "schema collection '{}' does not match table '{}'",
            schema.collection,
            table
        );
    }

    let columns: Vec<String> = Column::iter().map(|c| c.as_str().to_owned()).collect();
    for name in schema.column_names() {
        if !columns.iter().any(|c| c == name) {
            bail!("table '{table}' has no column for schema field '{name}'");
        }
    }
    Ok(())
}

#[async_trait::async_trait]
impl ClientsRepository for SeaOrmClientsRepository {
    async fn register_schema(&self, schema: &ClientSchema) -> anyhow::Result<()> {
        check_entity_matches(schema)?;

        info!(collection = schema.collection, "Running clients_info migrations");
        Migrator::up(&self.conn, None)
            .await
            .context("clients migrations failed")?;
        debug!("Clients schema registered");
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Client>> {
        let found = ClientEntity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_by_id failed")?;
        Ok(found.map(Into::into))
    }

    async fn insert(&self, c: Client) -> anyhow::Result<()> {
        let m: ClientAM = c.into();
        let _ = m.insert(&self.conn).await.context("insert failed")?;
        Ok(())
    }

    async fn update(&self, c: Client) -> anyhow::Result<bool> {
        let m: ClientAM = c.into();
        match m.update(&self.conn).await {
            Ok(_) => Ok(true),
            Err(DbErr::RecordNotUpdated) => Ok(false),
            Err(e) => Err(e).context("update failed"),
        }
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = ClientEntity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("delete failed")?;
        Ok(res.rows_affected > 0)
    }

    async fn list(&self, limit: u32, offset: u32) -> anyhow::Result<Vec<Client>> {
        let rows = ClientEntity::find()
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .limit(u64::from(limit))
            .offset(u64::from(offset))
            .all(&self.conn)
            .await
            .context("list failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self) -> anyhow::Result<u64> {
        ClientEntity::find()
            .count(&self.conn)
            .await
            .context("count failed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::schema::CLIENT_SCHEMA;
    use chrono::{Duration, Utc};
    use sea_orm::{ConnectOptions, Database};

    async fn registered_repo() -> SeaOrmClientsRepository {
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1)
            .min_connections(1)
            .sqlx_logging(false);
        let repo = SeaOrmClientsRepository::new(Database::connect(opts).await.unwrap());
        repo.register_schema(&CLIENT_SCHEMA).await.unwrap();
        repo
    }

    fn client(secs: i64) -> Client {
        let at = Utc::now() + Duration::seconds(secs);
        Client {
            id: Uuid::new_v4(),
            name: format!("client {secs}"),
            email: format!("c{secs}@example.com"),
            phone: "1".into(),
            location: "x".into(),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn entity_matches_client_schema() {
        check_entity_matches(&CLIENT_SCHEMA).unwrap();
    }

    #[test]
    fn foreign_collection_is_rejected() {
        let schema = ClientSchema {
            collection: "contacts",
            ..CLIENT_SCHEMA
        };
        let err = check_entity_matches(&schema).unwrap_err();
        assert!(err.to_string().contains("contacts"));
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_rows() {
        let repo = registered_repo().await;

        let mut c = client(0);
        assert!(!repo.update(c.clone()).await.unwrap());
        assert!(!repo.delete(c.id).await.unwrap());

        repo.insert(c.clone()).await.unwrap();
        assert!(repo.insert(c.clone()).await.is_err(), "duplicate id");

        c.location = "London".into();
        assert!(repo.update(c.clone()).await.unwrap());
        assert_eq!(repo.find_by_id(c.id).await.unwrap().unwrap().location, "London");

        assert!(repo.delete(c.id).await.unwrap());
        assert!(repo.find_by_id(c.id).await.unwrap().is_none());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn list_orders_by_creation_and_pages() {
        let repo = registered_repo().await;
        for secs in [30, 10, 20] {
            repo.insert(client(secs)).await.unwrap();
        }
        assert_eq!(repo.count().await.unwrap(), 3);

        let names: Vec<String> = repo
            .list(10, 0)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["client 10", "client 20", "client 30"]);

        let page = repo.list(1, 1).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].name, "client 20");
        assert!(repo.list(10, 3).await.unwrap().is_empty());
    }
}
