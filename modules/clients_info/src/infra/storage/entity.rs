use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

use crate::contract::model::Client;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "clients")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Client {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            phone: m.phone,
            location: m.location,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<Client> for ActiveModel {
    fn from(c: Client) -> Self {
        use sea_orm::Set;
        Self {
            id: Set(c.id),
            name: Set(c.name),
            email: Set(c.email),
            phone: Set(c.phone),
            location: Set(c.location),
            created_at: Set(c.created_at),
            updated_at: Set(c.updated_at),
        }
    }
}
