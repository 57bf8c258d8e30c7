pub mod client;
pub mod error;
pub mod model;
pub mod schema;

pub use client::ClientsApi;
pub use error::ClientsInfoError;
pub use model::{Client, ClientField, ClientPatch, NewClient};
pub use schema::{ClientSchema, FieldSpec, CLIENT_SCHEMA};
