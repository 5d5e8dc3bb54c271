//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of a stored object (invoice, purchase order, group, item,
/// milestone, job). Matches the `obj_uuid` primary key of the backing store.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(Uuid);

impl ObjectId {
    /// Create a fresh identifier (random v4, matching the store's defaults).
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for ObjectId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<ObjectId> for Uuid {
    fn from(value: ObjectId) -> Self {
        value.0
    }
}

impl FromStr for ObjectId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::from_str(s)
            .map_err(|e| DomainError::invalid_id(format!("ObjectId: {e}")))?;
        Ok(Self(uuid))
    }
}
