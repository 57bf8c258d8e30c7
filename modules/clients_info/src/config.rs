use serde::{Deserialize, Serialize};

use crate::domain::service::ServiceConfig;

/// Which record store backs the module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// Process-local map; contents are lost on exit.
    Memory,
    /// SeaORM connection supplied at init.
    #[default]
    Database,
}

/// Configuration for the clients_info module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientsInfoConfig {
    #[serde(default)]
    pub storage: StorageKind,
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
}

impl Default for ClientsInfoConfig {
    fn default() -> Self {
        Self {
            storage: StorageKind::default(),
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

impl From<&ClientsInfoConfig> for ServiceConfig {
    fn from(cfg: &ClientsInfoConfig) -> Self {
        Self {
            default_page_size: cfg.default_page_size,
            max_page_size: cfg.max_page_size,
        }
    }
}

fn default_page_size() -> u32 {
    50
}

fn default_max_page_size() -> u32 {
    1000
}
