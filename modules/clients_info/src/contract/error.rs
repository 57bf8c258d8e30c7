use thiserror::Error;
use uuid::Uuid;

use super::model::ClientField;
use crate::domain::error::{join_fields, DomainError};

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientsInfoError {
    #[error("Client not found: {id}")]
    NotFound { id: Uuid },

    #[error("Validation error: missing required field(s): {}", join_fields(.fields))]
    Validation { fields: Vec<ClientField> },

    /// Storage failure; `message` is the store's error chain.
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ClientsInfoError {
    pub fn not_found(id: Uuid) -> Self {
        Self::NotFound { id }
    }

    pub fn validation(fields: Vec<ClientField>) -> Self {
        Self::Validation { fields }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<DomainError> for ClientsInfoError {
    fn from(domain_error: DomainError) -> Self {
        match domain_error {
            DomainError::ClientNotFound { id } => Self::not_found(id),
            DomainError::Validation(err) => Self::validation(err.fields().to_vec()),
            DomainError::Storage { message } => Self::internal(message),
        }
    }
}
