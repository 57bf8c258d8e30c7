use thiserror::Error;
use uuid::Uuid;

use crate::contract::model::ClientField;

/// Rejection produced by the validator: every required field that was
/// empty after normalization, in declaration order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("missing required field(s): {}", join_fields(.fields))]
pub struct ValidationError {
    fields: Vec<ClientField>,
}

impl ValidationError {
    /// Returns `None` when there is nothing to report.
    pub fn from_fields(mut fields: Vec<ClientField>) -> Option<Self> {
        if fields.is_empty() {
            return None;
        }
        fields.sort_unstable();
        fields.dedup();
        Some(Self { fields })
    }

    pub fn fields(&self) -> &[ClientField] {
        &self.fields
    }

    pub fn contains(&self, field: ClientField) -> bool {
        self.fields.contains(&field)
    }
}

pub(crate) fn join_fields(fields: &[ClientField]) -> String {
    fields
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Client not found: {id}")]
    ClientNotFound { id: Uuid },

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn client_not_found(id: Uuid) -> Self {
        Self::ClientNotFound { id }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}
