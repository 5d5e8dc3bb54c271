//! Job directory used for view enrichment.
//!
//! Jobs live in a collaborating service; this side only needs the mapping
//! between a job's legacy numeric id and its UUID. Invoices reference jobs
//! by numeric id and are enriched with the UUID; purchase orders reference
//! jobs by UUID and are enriched with the numeric id.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use linguafin_core::ObjectId;

/// A job reference row: legacy numeric id plus UUID.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRef {
    pub id: i64,
    pub uuid: ObjectId,
}

/// Read-only lookup seam over the job table.
pub trait JobDirectory: Send + Sync {
    fn uuid_for_id(&self, id: i64) -> Option<ObjectId>;
    fn id_for_uuid(&self, uuid: &ObjectId) -> Option<i64>;
}

impl<D> JobDirectory for Arc<D>
where
    D: JobDirectory + ?Sized,
{
    fn uuid_for_id(&self, id: i64) -> Option<ObjectId> {
        (**self).uuid_for_id(id)
    }

    fn id_for_uuid(&self, uuid: &ObjectId) -> Option<i64> {
        (**self).id_for_uuid(uuid)
    }
}

/// In-memory job directory for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryJobDirectory {
    by_id: RwLock<HashMap<i64, ObjectId>>,
}

impl InMemoryJobDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, job: JobRef) {
        if let Ok(mut map) = self.by_id.write() {
            map.insert(job.id, job.uuid);
        }
    }
}

impl JobDirectory for InMemoryJobDirectory {
    fn uuid_for_id(&self, id: i64) -> Option<ObjectId> {
        let map = self.by_id.read().ok()?;
        map.get(&id).copied()
    }

    fn id_for_uuid(&self, uuid: &ObjectId) -> Option<i64> {
        let map = self.by_id.read().ok()?;
        map.iter().find(|(_, u)| *u == uuid).map(|(id, _)| *id)
    }
}
