//! Purchase order and milestone operations.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use linguafin_core::{DocumentKind, DomainError, DomainResult, ObjectId, Page};
use linguafin_infra::{DocumentStore, JobDirectory};
use linguafin_workflow::validate_po_status_transition;

use crate::batch::{BatchItemResult, BatchOutcome};
use crate::milestone::{
    NewPoMilestone, PoMilestone, PoMilestoneUpdate, sort_milestones, validate_percentage,
};
use crate::order::{
    NewPurchaseOrder, PurchaseOrder, PurchaseOrderFilterParams, PurchaseOrderUpdate,
    PurchaseOrderView, sort_orders,
};

pub struct PurchaseOrderService {
    orders: Arc<dyn DocumentStore<ObjectId, PurchaseOrder>>,
    milestones: Arc<dyn DocumentStore<ObjectId, PoMilestone>>,
    jobs: Arc<dyn JobDirectory>,
}

impl PurchaseOrderService {
    pub fn new(
        orders: Arc<dyn DocumentStore<ObjectId, PurchaseOrder>>,
        milestones: Arc<dyn DocumentStore<ObjectId, PoMilestone>>,
        jobs: Arc<dyn JobDirectory>,
    ) -> Self {
        Self {
            orders,
            milestones,
            jobs,
        }
    }

    fn view_of(&self, order: PurchaseOrder) -> PurchaseOrderView {
        let job_id = order
            .job_ref
            .as_ref()
            .and_then(|uuid| self.jobs.id_for_uuid(uuid));
        PurchaseOrderView { order, job_id }
    }

    fn load_live(&self, uuid: &ObjectId) -> DomainResult<PurchaseOrder> {
        match self.orders.get(uuid) {
            Some(po) if !po.is_deleted => Ok(po),
            _ => Err(DomainError::not_found(DocumentKind::PurchaseOrder, *uuid)),
        }
    }

    pub fn create_order(
        &self,
        new: NewPurchaseOrder,
        user_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> PurchaseOrderView {
        let order = new.into_order(user_id.map(str::to_string), now);
        info!(po_uuid = %order.uuid, "purchase order created");
        self.orders.upsert(order.uuid, order.clone());
        self.view_of(order)
    }

    pub fn get_order(&self, uuid: &ObjectId) -> Option<PurchaseOrderView> {
        let order = self.orders.get(uuid).filter(|po| !po.is_deleted)?;
        Some(self.view_of(order))
    }

    pub fn require_order(&self, uuid: &ObjectId) -> DomainResult<PurchaseOrderView> {
        self.load_live(uuid).map(|po| self.view_of(po))
    }

    /// Apply a partial update, checking a requested status change against
    /// the workflow table first.
    pub fn update_order(
        &self,
        uuid: &ObjectId,
        patch: PurchaseOrderUpdate,
        user_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> DomainResult<PurchaseOrderView> {
        let mut order = self.load_live(uuid)?;
        if let (Some(current), Some(requested)) = (&order.status, &patch.status) {
            validate_po_status_transition(current, requested)?;
        }
        patch.apply(&mut order);
        order.modified_by = user_id.map(str::to_string);
        order.modified = Some(now);
        debug!(po_uuid = %uuid, "purchase order updated");
        self.orders.upsert(order.uuid, order.clone());
        Ok(self.view_of(order))
    }

    /// Approve the order for payment. The transition is validated from the
    /// current status, defaulting to `Pending` for orders without one, so a
    /// fresh order cannot be approved before the work is completed.
    pub fn approve_order(
        &self,
        uuid: &ObjectId,
        user_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> DomainResult<PurchaseOrderView> {
        let mut order = self.load_live(uuid)?;
        let current = order.status.as_deref().unwrap_or("Pending");
        validate_po_status_transition(current, "Approved")?;
        order.status = Some("Approved".to_string());
        order.approved_for_payment = Some(1);
        order.approved_date = Some(now);
        order.modified_by = user_id.map(str::to_string);
        order.modified = Some(now);
        info!(po_uuid = %uuid, "purchase order approved for payment");
        self.orders.upsert(order.uuid, order.clone());
        Ok(self.view_of(order))
    }

    /// Soft-delete and stamp the status `Archived`.
    pub fn archive_order(
        &self,
        uuid: &ObjectId,
        user_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> DomainResult<PurchaseOrderView> {
        let mut order = self.load_live(uuid)?;
        order.is_deleted = true;
        order.status = Some("Archived".to_string());
        order.modified_by = user_id.map(str::to_string);
        order.modified = Some(now);
        info!(po_uuid = %uuid, "purchase order archived");
        self.orders.upsert(order.uuid, order.clone());
        Ok(self.view_of(order))
    }

    /// Bring an archived order back into the live set at `Pending`.
    pub fn restore_order(
        &self,
        uuid: &ObjectId,
        user_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> DomainResult<PurchaseOrderView> {
        let mut order = self
            .orders
            .get(uuid)
            .ok_or_else(|| DomainError::not_found(DocumentKind::PurchaseOrder, *uuid))?;
        order.is_deleted = false;
        if order.status.as_deref() == Some("Archived") {
            order.status = Some("Pending".to_string());
        }
        order.modified_by = user_id.map(str::to_string);
        order.modified = Some(now);
        info!(po_uuid = %uuid, "purchase order restored");
        self.orders.upsert(order.uuid, order.clone());
        Ok(self.view_of(order))
    }

    /// Soft-delete without touching the status.
    pub fn delete_order(
        &self,
        uuid: &ObjectId,
        user_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        let mut order = self.load_live(uuid)?;
        order.is_deleted = true;
        order.modified_by = user_id.map(str::to_string);
        order.modified = Some(now);
        info!(po_uuid = %uuid, "purchase order deleted");
        self.orders.upsert(order.uuid, order);
        Ok(())
    }

    pub fn list_orders(&self, filters: &PurchaseOrderFilterParams) -> Page<PurchaseOrderView> {
        let mut rows: Vec<PurchaseOrder> = self
            .orders
            .list()
            .into_iter()
            .filter(|po| !po.is_deleted && filters.matches(po))
            .collect();
        sort_orders(&mut rows, &filters.sort_by, filters.sort_order);
        let page = filters.page.paginate(rows);
        Page {
            items: page.items.into_iter().map(|po| self.view_of(po)).collect(),
            total: page.total,
            page: page.page,
            page_size: page.page_size,
        }
    }

    /// Approve each order independently; one failure never aborts the rest.
    pub fn batch_approve(
        &self,
        uuids: &[ObjectId],
        user_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        for uuid in uuids {
            match self.approve_order(uuid, user_id, now) {
                Ok(_) => outcome.push(BatchItemResult::ok(*uuid)),
                Err(err) => {
                    warn!(po_uuid = %uuid, error = %err, "batch approve item failed");
                    outcome.push(BatchItemResult::failed(*uuid, &err));
                }
            }
        }
        info!(
            success = outcome.success_count,
            failed = outcome.failure_count,
            "batch approve finished"
        );
        outcome
    }

    /// Soft-delete each order independently.
    pub fn batch_delete(
        &self,
        uuids: &[ObjectId],
        user_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        for uuid in uuids {
            match self.delete_order(uuid, user_id, now) {
                Ok(()) => outcome.push(BatchItemResult::ok(*uuid)),
                Err(err) => {
                    warn!(po_uuid = %uuid, error = %err, "batch delete item failed");
                    outcome.push(BatchItemResult::failed(*uuid, &err));
                }
            }
        }
        info!(
            success = outcome.success_count,
            failed = outcome.failure_count,
            "batch delete finished"
        );
        outcome
    }

    // ---- milestones -------------------------------------------------------

    pub fn create_milestone(
        &self,
        po_uuid: &ObjectId,
        new: NewPoMilestone,
        now: DateTime<Utc>,
    ) -> DomainResult<PoMilestone> {
        self.load_live(po_uuid)?;
        validate_percentage(new.milestone)?;
        let milestone = new.into_milestone(*po_uuid, now);
        debug!(po_uuid = %po_uuid, milestone_uuid = %milestone.uuid, "milestone created");
        self.milestones.upsert(milestone.uuid, milestone.clone());
        Ok(milestone)
    }

    pub fn require_milestone(&self, uuid: &ObjectId) -> DomainResult<PoMilestone> {
        self.milestones
            .get(uuid)
            .ok_or_else(|| DomainError::not_found(DocumentKind::PoMilestone, *uuid))
    }

    pub fn update_milestone(
        &self,
        uuid: &ObjectId,
        patch: PoMilestoneUpdate,
        now: DateTime<Utc>,
    ) -> DomainResult<PoMilestone> {
        let mut milestone = self.require_milestone(uuid)?;
        validate_percentage(patch.milestone)?;
        patch.apply(&mut milestone);
        milestone.modified = Some(now);
        self.milestones.upsert(milestone.uuid, milestone.clone());
        Ok(milestone)
    }

    /// Hard delete, like invoice items.
    pub fn delete_milestone(&self, uuid: &ObjectId) -> DomainResult<()> {
        self.milestones
            .remove(uuid)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found(DocumentKind::PoMilestone, *uuid))
    }

    pub fn list_milestones(&self, po_uuid: &ObjectId) -> Vec<PoMilestone> {
        let mut rows: Vec<PoMilestone> = self
            .milestones
            .list()
            .into_iter()
            .filter(|m| m.po_uuid == *po_uuid)
            .collect();
        sort_milestones(&mut rows);
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use linguafin_infra::{InMemoryDocumentStore, InMemoryJobDirectory, JobRef};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, 2, 10, 0, 0).unwrap()
    }

    fn service() -> (PurchaseOrderService, Arc<InMemoryJobDirectory>) {
        let jobs = Arc::new(InMemoryJobDirectory::new());
        let service = PurchaseOrderService::new(
            Arc::new(InMemoryDocumentStore::new()),
            Arc::new(InMemoryDocumentStore::new()),
            jobs.clone(),
        );
        (service, jobs)
    }

    fn order_with_status(service: &PurchaseOrderService, status: &str) -> ObjectId {
        let view = service.create_order(
            NewPurchaseOrder {
                status: Some(status.to_string()),
                ..NewPurchaseOrder::default()
            },
            Some("pm-1"),
            now(),
        );
        view.order.uuid
    }

    #[test]
    fn views_carry_the_legacy_job_id() {
        let (service, jobs) = service();
        let job_uuid = ObjectId::new();
        jobs.insert(JobRef { id: 12, uuid: job_uuid });

        let view = service.create_order(
            NewPurchaseOrder {
                job_ref: Some(job_uuid),
                ..NewPurchaseOrder::default()
            },
            None,
            now(),
        );
        assert_eq!(view.job_id, Some(12));
    }

    #[test]
    fn approve_from_completed_sets_the_payment_flag() {
        let (service, _) = service();
        let uuid = order_with_status(&service, "Completed");

        let view = service.approve_order(&uuid, Some("fin-1"), now()).unwrap();
        assert_eq!(view.order.status.as_deref(), Some("Approved"));
        assert_eq!(view.order.approved_for_payment, Some(1));
        assert_eq!(view.order.approved_date, Some(now()));
        assert_eq!(view.order.modified_by.as_deref(), Some("fin-1"));
    }

    #[test]
    fn approve_from_pending_rejects_and_mutates_nothing() {
        let (service, _) = service();
        let uuid = order_with_status(&service, "Pending");

        let err = service.approve_order(&uuid, Some("fin-1"), now()).unwrap_err();
        assert!(err.is_invalid_transition());

        let stored = service.require_order(&uuid).unwrap().order;
        assert_eq!(stored.status.as_deref(), Some("Pending"));
        assert_eq!(stored.approved_for_payment, None);
        assert_eq!(stored.approved_date, None);
    }

    #[test]
    fn approve_without_a_status_is_treated_as_pending() {
        let (service, _) = service();
        let view = service.create_order(NewPurchaseOrder::default(), None, now());

        let err = service
            .approve_order(&view.order.uuid, None, now())
            .unwrap_err();
        assert!(err.is_invalid_transition());
    }

    #[test]
    fn update_validates_the_requested_transition() {
        let (service, _) = service();
        let uuid = order_with_status(&service, "Pending");

        let view = service
            .update_order(
                &uuid,
                PurchaseOrderUpdate {
                    status: Some("Accepted".to_string()),
                    accepted: Some(true),
                    ..PurchaseOrderUpdate::default()
                },
                None,
                now(),
            )
            .unwrap();
        assert_eq!(view.order.status.as_deref(), Some("Accepted"));
        assert_eq!(view.order.accepted, Some(true));

        let err = service
            .update_order(
                &uuid,
                PurchaseOrderUpdate {
                    status: Some("Paid".to_string()),
                    ..PurchaseOrderUpdate::default()
                },
                None,
                now(),
            )
            .unwrap_err();
        assert!(err.is_invalid_transition());
    }

    #[test]
    fn archive_then_restore_round_trips_to_pending() {
        let (service, _) = service();
        let uuid = order_with_status(&service, "Accepted");

        let archived = service.archive_order(&uuid, None, now()).unwrap();
        assert!(archived.order.is_deleted);
        assert_eq!(archived.order.status.as_deref(), Some("Archived"));
        assert!(service.get_order(&uuid).is_none());

        let restored = service.restore_order(&uuid, None, now()).unwrap();
        assert!(!restored.order.is_deleted);
        assert_eq!(restored.order.status.as_deref(), Some("Pending"));
    }

    #[test]
    fn batch_approve_isolates_failures() {
        let (service, _) = service();
        let good_a = order_with_status(&service, "Completed");
        let bad_state = order_with_status(&service, "Pending");
        let good_b = order_with_status(&service, "Disputed");
        let missing = ObjectId::new();

        let outcome =
            service.batch_approve(&[good_a, bad_state, good_b, missing], Some("fin-1"), now());
        assert_eq!(outcome.success_count, 2);
        assert_eq!(outcome.failure_count, 2);
        assert_eq!(outcome.results.len(), 4);
        assert!(outcome.results[0].is_ok());
        assert!(!outcome.results[1].is_ok());
        assert!(outcome.results[2].is_ok());
        assert!(!outcome.results[3].is_ok());

        // the failed order is untouched
        let stored = service.require_order(&bad_state).unwrap().order;
        assert_eq!(stored.status.as_deref(), Some("Pending"));
    }

    #[test]
    fn batch_delete_reports_missing_orders() {
        let (service, _) = service();
        let a = order_with_status(&service, "Pending");
        let missing = ObjectId::new();

        let outcome = service.batch_delete(&[a, missing], None, now());
        assert_eq!(outcome.success_count, 1);
        assert_eq!(outcome.failure_count, 1);
        assert!(service.get_order(&a).is_none());
    }

    #[test]
    fn milestones_follow_their_order() {
        let (service, _) = service();
        let uuid = order_with_status(&service, "Accepted");

        let m = service
            .create_milestone(
                &uuid,
                NewPoMilestone {
                    milestone: Some(50),
                    notes: Some("first delivery".to_string()),
                    ..NewPoMilestone::default()
                },
                now(),
            )
            .unwrap();
        assert_eq!(service.list_milestones(&uuid).len(), 1);

        let updated = service
            .update_milestone(
                &m.uuid,
                PoMilestoneUpdate {
                    confirmed: Some(true),
                    date_completed: Some(now()),
                    ..PoMilestoneUpdate::default()
                },
                now(),
            )
            .unwrap();
        assert_eq!(updated.confirmed, Some(true));
        assert_eq!(updated.milestone, Some(50));

        service.delete_milestone(&m.uuid).unwrap();
        assert!(service.list_milestones(&uuid).is_empty());
        assert!(service.require_milestone(&m.uuid).is_err());

        service.delete_order(&uuid, None, now()).unwrap();
        let err = service
            .create_milestone(&uuid, NewPoMilestone::default(), now())
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn milestones_list_in_percentage_order() {
        let (service, _) = service();
        let uuid = order_with_status(&service, "Accepted");
        for pct in [100, 25, 50] {
            service
                .create_milestone(
                    &uuid,
                    NewPoMilestone {
                        milestone: Some(pct),
                        ..NewPoMilestone::default()
                    },
                    now(),
                )
                .unwrap();
        }

        let pcts: Vec<Option<i32>> = service
            .list_milestones(&uuid)
            .iter()
            .map(|m| m.milestone)
            .collect();
        assert_eq!(pcts, vec![Some(25), Some(50), Some(100)]);
    }

    #[test]
    fn milestone_percentage_is_validated_on_create_and_update() {
        let (service, _) = service();
        let uuid = order_with_status(&service, "Accepted");

        let err = service
            .create_milestone(
                &uuid,
                NewPoMilestone {
                    milestone: Some(0),
                    ..NewPoMilestone::default()
                },
                now(),
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let m = service
            .create_milestone(
                &uuid,
                NewPoMilestone {
                    milestone: Some(30),
                    ..NewPoMilestone::default()
                },
                now(),
            )
            .unwrap();
        let err = service
            .update_milestone(
                &m.uuid,
                PoMilestoneUpdate {
                    milestone: Some(101),
                    ..PoMilestoneUpdate::default()
                },
                now(),
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(service.require_milestone(&m.uuid).unwrap().milestone, Some(30));
    }
}
