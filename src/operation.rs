//! Write operations whose bodies come from typed patches
//!
//! A patch struct marks its columns as `Nullable` so the body only carries
//! what the caller touched: unset columns are left out of the request, null
//! columns are cleared on the server.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single write against Dynamics 365 with a JSON object body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    /// Create a new record
    Create {
        /// Entity logical name (e.g., "contacts", "accounts")
        entity: String,
        data: Map<String, Value>,
    },
    /// Update an existing record
    Update {
        entity: String,
        /// Record ID (GUID)
        id: String,
        data: Map<String, Value>,
    },
    /// Create or update based on an alternate key
    Upsert {
        entity: String,
        /// Alternate key field (e.g., "emailaddress1")
        key_field: String,
        key_value: String,
        data: Map<String, Value>,
    },
}

impl Operation {
    pub fn create(entity: impl Into<String>, data: Map<String, Value>) -> Self {
        Self::Create {
            entity: entity.into(),
            data,
        }
    }

    pub fn update(
        entity: impl Into<String>,
        id: impl Into<String>,
        data: Map<String, Value>,
    ) -> Self {
        Self::Update {
            entity: entity.into(),
            id: id.into(),
            data,
        }
    }

    pub fn upsert(
        entity: impl Into<String>,
        key_field: impl Into<String>,
        key_value: impl Into<String>,
        data: Map<String, Value>,
    ) -> Self {
        Self::Upsert {
            entity: entity.into(),
            key_field: key_field.into(),
            key_value: key_value.into(),
            data,
        }
    }

    /// Create operation with the body serialized from `patch`
    pub fn create_from<P: Serialize>(entity: impl Into<String>, patch: &P) -> Result<Self> {
        let entity = entity.into();
        let data = patch_body(&entity, patch)?;
        Ok(Self::create(entity, data))
    }

    /// Update operation with the body serialized from `patch`
    pub fn update_from<P: Serialize>(
        entity: impl Into<String>,
        id: impl Into<String>,
        patch: &P,
    ) -> Result<Self> {
        let entity = entity.into();
        let data = patch_body(&entity, patch)?;
        Ok(Self::update(entity, id, data))
    }

    /// Upsert operation with the body serialized from `patch`
    pub fn upsert_from<P: Serialize>(
        entity: impl Into<String>,
        key_field: impl Into<String>,
        key_value: impl Into<String>,
        patch: &P,
    ) -> Result<Self> {
        let entity = entity.into();
        let data = patch_body(&entity, patch)?;
        Ok(Self::upsert(entity, key_field, key_value, data))
    }

    /// Get the entity name for this operation
    pub fn entity(&self) -> &str {
        match self {
            Self::Create { entity, .. } => entity,
            Self::Update { entity, .. } => entity,
            Self::Upsert { entity, .. } => entity,
        }
    }

    pub fn data(&self) -> &Map<String, Value> {
        match self {
            Self::Create { data, .. } => data,
            Self::Update { data, .. } => data,
            Self::Upsert { data, .. } => data,
        }
    }

    /// Get the HTTP method for this operation
    pub fn http_method(&self) -> &'static str {
        match self {
            Self::Create { .. } => "POST",
            Self::Update { .. } => "PATCH",
            Self::Upsert { .. } => "PATCH",
        }
    }

    /// Get the operation type as a string
    pub fn operation_type(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::Update { .. } => "update",
            Self::Upsert { .. } => "upsert",
        }
    }

    /// Columns written with a value
    pub fn changed_fields(&self) -> Vec<&str> {
        self.data()
            .iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(key, _)| key.as_str())
            .collect()
    }

    /// Columns cleared to null
    pub fn cleared_fields(&self) -> Vec<&str> {
        self.data()
            .iter()
            .filter(|(_, value)| value.is_null())
            .map(|(key, _)| key.as_str())
            .collect()
    }
}

fn patch_body<P: Serialize>(entity: &str, patch: &P) -> Result<Map<String, Value>> {
    let value = serde_json::to_value(patch)
        .with_context(|| format!("Failed to serialize body for {}", entity))?;

    let data = match value {
        Value::Object(data) => data,
        other => anyhow::bail!(
            "Body for {} must serialize to a JSON object, got {}",
            entity,
            other
        ),
    };

    log::debug!(
        "Built body for {}: {} field(s), {} null",
        entity,
        data.len(),
        data.values().filter(|v| v.is_null()).count()
    );

    Ok(data)
}
