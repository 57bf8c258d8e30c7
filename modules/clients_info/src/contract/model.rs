use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored contact record for a person or organization.
///
/// Values are always normalized: text fields are trimmed and `email` is lowercase.
/// `created_at <= updated_at` holds for every record the domain service produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw input for creating a client; may carry untrimmed or mixed-case values.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
}

/// Partial update data for a client. `None` keeps the current value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClientPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
}

/// User-supplied client fields, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientField {
    Name,
    Email,
    Phone,
    Location,
}

impl ClientField {
    pub const ALL: [ClientField; 4] = [Self::Name, Self::Email, Self::Phone, Self::Location];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Location => "location",
        }
    }
}

impl fmt::Display for ClientField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl NewClient {
    pub fn get(&self, field: ClientField) -> &str {
        match field {
            ClientField::Name => &self.name,
            ClientField::Email => &self.email,
            ClientField::Phone => &self.phone,
            ClientField::Location => &self.location,
        }
    }
}

impl ClientPatch {
    pub fn is_empty(&self) -> bool {
        ClientField::ALL.iter().all(|f| self.get(*f).is_none())
    }

    pub fn get(&self, field: ClientField) -> Option<&str> {
        match field {
            ClientField::Name => self.name.as_deref(),
            ClientField::Email => self.email.as_deref(),
            ClientField::Phone => self.phone.as_deref(),
            ClientField::Location => self.location.as_deref(),
        }
    }
}

impl Client {
    pub fn get(&self, field: ClientField) -> &str {
        match field {
            ClientField::Name => &self.name,
            ClientField::Email => &self.email,
            ClientField::Phone => &self.phone,
            ClientField::Location => &self.location,
        }
    }

    pub(crate) fn set(&mut self, field: ClientField, value: String) {
        match field {
            ClientField::Name => self.name = value,
            ClientField::Email => self.email = value,
            ClientField::Phone => self.phone = value,
            ClientField::Location => self.location = value,
        }
    }
}

impl From<&Client> for NewClient {
    fn from(c: &Client) -> Self {
        Self {
            name: c.name.clone(),
            email: c.email.clone(),
            phone: c.phone.clone(),
            location: c.location.clone(),
        }
    }
}
