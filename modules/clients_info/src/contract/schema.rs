//! Static description of the client record, handed to the record store
//! once at startup.

use serde::Serialize;

use super::model::ClientField;

/// Normalization and presence rules for one user-supplied field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub field: ClientField,
    pub required: bool,
    pub trim: bool,
    pub lowercase: bool,
}

impl FieldSpec {
    const fn text(field: ClientField) -> Self {
        Self {
            field,
            required: true,
            trim: true,
            lowercase: false,
        }
    }

    const fn lowercased(self) -> Self {
        Self {
            lowercase: true,
            ..self
        }
    }

    pub fn name(&self) -> &'static str {
        self.field.as_str()
    }

    /// Apply the field's normalization rules to a raw value.
    pub fn normalize(&self, raw: &str) -> String {
        let value = if self.trim { raw.trim() } else { raw };
        if self.lowercase {
            value.to_lowercase()
        } else {
            value.to_owned()
        }
    }

    /// Whether an already-normalized value satisfies the presence rule.
    pub fn is_satisfied_by(&self, normalized: &str) -> bool {
        !self.required || !normalized.is_empty()
    }
}

/// Names of the service-managed timestamp columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimestampSpec {
    pub created_at: &'static str,
    pub updated_at: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClientSchema {
    pub collection: &'static str,
    pub fields: [FieldSpec; 4],
    pub timestamps: TimestampSpec,
}

pub static CLIENT_SCHEMA: ClientSchema = ClientSchema {
    collection: "clients",
    fields: [
        FieldSpec::text(ClientField::Name),
        FieldSpec::text(ClientField::Email).lowercased(),
        FieldSpec::text(ClientField::Phone),
        FieldSpec::text(ClientField::Location),
    ],
    timestamps: TimestampSpec {
        created_at: "created_at",
        updated_at: "updated_at",
    },
};

impl ClientSchema {
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, field: ClientField) -> &FieldSpec {
        // `fields` is declared in `ClientField::ALL` order.
        &self.fields[field as usize]
    }

    /// Every column name the store must provide, id first.
    pub fn column_names(&self) -> Vec<&'static str> {
        std::iter::once("id")
            .chain(self.fields.iter().map(FieldSpec::name))
            .chain([self.timestamps.created_at, self.timestamps.updated_at])
            .collect()
    }
}
