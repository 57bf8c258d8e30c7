//! Pure validate-and-normalize functions for client records.
//!
//! Normalization rules come from [`CLIENT_SCHEMA`], so what the validator
//! accepts is exactly what the registered schema describes. Nothing here
//! performs I/O or reads the clock; callers pass `now`.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::contract::model::{Client, ClientField, ClientPatch, NewClient};
use crate::contract::schema::CLIENT_SCHEMA;
use crate::domain::error::ValidationError;

/// Normalize every field of `input` and check presence.
/// All failing fields are reported together.
pub fn normalize_new_client(input: &NewClient) -> Result<NewClient, ValidationError> {
    let mut missing = Vec::new();
    let mut normalized = [String::new(), String::new(), String::new(), String::new()];

    for (slot, spec) in normalized.iter_mut().zip(CLIENT_SCHEMA.fields()) {
        let value = spec.normalize(input.get(spec.field));
        if !spec.is_satisfied_by(&value) {
            missing.push(spec.field);
        }
        *slot = value;
    }

    if let Some(err) = ValidationError::from_fields(missing) {
        return Err(err);
    }

    let [name, email, phone, location] = normalized;
    Ok(NewClient {
        name,
        email,
        phone,
        location,
    })
}

/// Build a new record: both timestamps are `now`.
pub fn build_client(
    id: Uuid,
    input: &NewClient,
    now: DateTime<Utc>,
) -> Result<Client, ValidationError> {
    let NewClient {
        name,
        email,
        phone,
        location,
    } = normalize_new_client(input)?;

    Ok(Client {
        id,
        name,
        email,
        phone,
        location,
        created_at: now,
        updated_at: now,
    })
}

/// Apply a partial update. Supplied fields go through the same rules as on
/// creation; `id` and `created_at` are carried over and `updated_at` advances.
pub fn apply_patch(
    current: &Client,
    patch: &ClientPatch,
    now: DateTime<Utc>,
) -> Result<Client, ValidationError> {
    let mut next = current.clone();
    let mut missing = Vec::new();

    for field in ClientField::ALL {
        let Some(raw) = patch.get(field) else {
            continue;
        };
        let spec = CLIENT_SCHEMA.field(field);
        let value = spec.normalize(raw);
        if !spec.is_satisfied_by(&value) {
            missing.push(field);
        }
        next.set(field, value);
    }

    if let Some(err) = ValidationError::from_fields(missing) {
        return Err(err);
    }

    next.updated_at = next_updated_at(current.updated_at.max(current.created_at), now);
    Ok(next)
}

/// Re-run normalization over a stored record. A record produced by
/// [`build_client`] or [`apply_patch`] comes back unchanged.
pub fn revalidate(client: &Client) -> Result<Client, ValidationError> {
    let normalized = normalize_new_client(&NewClient::from(client))?;
    Ok(Client {
        name: normalized.name,
        email: normalized.email,
        phone: normalized.phone,
        location: normalized.location,
        ..client.clone()
    })
}

/// `now` if it is later than `previous`, otherwise the smallest step past `previous`.
pub fn next_updated_at(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}
