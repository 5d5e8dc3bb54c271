//! Batch operation results.
//!
//! Batch approve/delete work item by item: one bad UUID or one illegal
//! transition fails that item only, and the caller gets a per-item report.

use serde::{Deserialize, Serialize};

use linguafin_core::{DomainError, ObjectId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "status", content = "error")]
pub enum BatchItemStatus {
    Ok,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchItemResult {
    pub uuid: ObjectId,
    #[serde(flatten)]
    pub status: BatchItemStatus,
}

impl BatchItemResult {
    pub fn ok(uuid: ObjectId) -> Self {
        Self {
            uuid,
            status: BatchItemStatus::Ok,
        }
    }

    pub fn failed(uuid: ObjectId, err: &DomainError) -> Self {
        Self {
            uuid,
            status: BatchItemStatus::Failed(err.to_string()),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self.status, BatchItemStatus::Ok)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub success_count: usize,
    pub failure_count: usize,
    pub results: Vec<BatchItemResult>,
}

impl BatchOutcome {
    pub fn push(&mut self, result: BatchItemResult) {
        if result.is_ok() {
            self.success_count += 1;
        } else {
            self.failure_count += 1;
        }
        self.results.push(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linguafin_core::DocumentKind;

    #[test]
    fn counts_track_pushed_results() {
        let mut outcome = BatchOutcome::default();
        let uuid = ObjectId::new();
        outcome.push(BatchItemResult::ok(uuid));
        outcome.push(BatchItemResult::failed(
            uuid,
            &DomainError::not_found(DocumentKind::PurchaseOrder, uuid),
        ));

        assert_eq!(outcome.success_count, 1);
        assert_eq!(outcome.failure_count, 1);
        assert_eq!(outcome.results.len(), 2);
        assert!(outcome.results[0].is_ok());
        assert!(!outcome.results[1].is_ok());
    }
}
