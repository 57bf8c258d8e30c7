//! Process-local store for clients; contents are lost on exit.

use std::collections::HashMap;

use anyhow::{anyhow, bail};
use parking_lot::RwLock;
use uuid::Uuid;

use crate::contract::model::Client;
use crate::contract::schema::ClientSchema;
use crate::domain::repo::ClientsRepository;

#[derive(Default)]
pub struct InMemoryClientsRepository {
    schema: RwLock<Option<ClientSchema>>,
    rows: RwLock<HashMap<Uuid, Client>>,
}

impl InMemoryClientsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_registered(&self) -> anyhow::Result<()> {
        if self.schema.read().is_none() {
            return Err(anyhow!("clients schema is not registered"));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl ClientsRepository for InMemoryClientsRepository {
    async fn register_schema(&self, schema: &ClientSchema) -> anyhow::Result<()> {
        let mut slot = self.schema.write();
        match slot.as_ref() {
            Some(existing) if existing == schema => Ok(()),
            Some(existing) => bail!(
                "store already holds schema for '{}', cannot register '{}'",
                existing.collection,
                schema.collection
            ),
            None => {
                *slot = Some(*schema);
                Ok(())
            }
        }
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Client>> {
        self.ensure_registered()?;
        Ok(self.rows.read().get(&id).cloned())
    }

    async fn insert(&self, c: Client) -> anyhow::Result<()> {
        self.ensure_registered()?;
        let mut rows = self.rows.write();
        if rows.contains_key(&c.id) {
            bail!("client {} already exists", c.id);
        }
        rows.insert(c.id, c);
        Ok(())
    }

    async fn update(&self, c: Client) -> anyhow::Result<bool> {
        self.ensure_registered()?;
        let mut rows = self.rows.write();
        match rows.get_mut(&c.id) {
            Some(slot) => {
                *slot = c;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        self.ensure_registered()?;
        Ok(self.rows.write().remove(&id).is_some())
    }

    async fn list(&self, limit: u32, offset: u32) -> anyhow::Result<Vec<Client>> {
        self.ensure_registered()?;
        let mut all: Vec<Client> = self.rows.read().values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(all
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self) -> anyhow::Result<u64> {
        self.ensure_registered()?;
        Ok(self.rows.read().len() as u64)
    }
}
