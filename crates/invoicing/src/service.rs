//! Invoice, invoice item and invoice group operations.
//!
//! Every state-changing path follows the same shape: load the live record,
//! validate what needs validating, mutate, stamp the audit fields, persist,
//! and hand back an enriched view. Status transitions are checked only on
//! update and approve; archive, restore and delete move records in and out
//! of the soft-deleted set without consulting the workflow tables.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use linguafin_core::{DocumentKind, DomainResult, DomainError, ObjectId, Page};
use linguafin_infra::{DocumentStore, JobDirectory};
use linguafin_workflow::validate_invoice_status_transition;

use crate::group::{
    InvoiceGroup, InvoiceGroupFilterParams, InvoiceGroupUpdate, InvoiceGroupWithInvoices,
    NewInvoiceGroup, sort_groups,
};
use crate::invoice::{
    Invoice, InvoiceFilterParams, InvoiceUpdate, InvoiceView, NewInvoice, sort_invoices,
};
use crate::item::{InvoiceItem, InvoiceItemUpdate, NewInvoiceItem, sort_items};

pub struct InvoiceService {
    invoices: Arc<dyn DocumentStore<ObjectId, Invoice>>,
    items: Arc<dyn DocumentStore<ObjectId, InvoiceItem>>,
    groups: Arc<dyn DocumentStore<ObjectId, InvoiceGroup>>,
    jobs: Arc<dyn JobDirectory>,
}

impl InvoiceService {
    pub fn new(
        invoices: Arc<dyn DocumentStore<ObjectId, Invoice>>,
        items: Arc<dyn DocumentStore<ObjectId, InvoiceItem>>,
        groups: Arc<dyn DocumentStore<ObjectId, InvoiceGroup>>,
        jobs: Arc<dyn JobDirectory>,
    ) -> Self {
        Self {
            invoices,
            items,
            groups,
            jobs,
        }
    }

    fn view_of(&self, invoice: Invoice) -> InvoiceView {
        let job_uuid = invoice.job_id.and_then(|id| self.jobs.uuid_for_id(id));
        InvoiceView { invoice, job_uuid }
    }

    /// Load a non-deleted invoice or report it missing.
    fn load_live(&self, uuid: &ObjectId) -> DomainResult<Invoice> {
        match self.invoices.get(uuid) {
            Some(inv) if !inv.deleted => Ok(inv),
            _ => Err(DomainError::not_found(DocumentKind::Invoice, *uuid)),
        }
    }

    pub fn create_invoice(
        &self,
        new: NewInvoice,
        user_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> InvoiceView {
        let invoice = new.into_invoice(user_id.map(str::to_string), now);
        info!(invoice_uuid = %invoice.uuid, "invoice created");
        self.invoices.upsert(invoice.uuid, invoice.clone());
        self.view_of(invoice)
    }

    pub fn get_invoice(&self, uuid: &ObjectId) -> Option<InvoiceView> {
        let invoice = self.invoices.get(uuid).filter(|inv| !inv.deleted)?;
        Some(self.view_of(invoice))
    }

    pub fn require_invoice(&self, uuid: &ObjectId) -> DomainResult<InvoiceView> {
        self.load_live(uuid).map(|inv| self.view_of(inv))
    }

    /// Apply a partial update. A requested status change is checked against
    /// the workflow table before anything is written; invoices that carry no
    /// status yet accept any first status.
    pub fn update_invoice(
        &self,
        uuid: &ObjectId,
        patch: InvoiceUpdate,
        user_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> DomainResult<InvoiceView> {
        let mut invoice = self.load_live(uuid)?;
        if let (Some(current), Some(requested)) = (&invoice.status, &patch.status) {
            validate_invoice_status_transition(current, requested)?;
        }
        patch.apply(&mut invoice);
        invoice.modified_by = user_id.map(str::to_string);
        invoice.modified = Some(now);
        debug!(invoice_uuid = %uuid, "invoice updated");
        self.invoices.upsert(invoice.uuid, invoice.clone());
        Ok(self.view_of(invoice))
    }

    /// Move the invoice to `Approved`. The transition is validated from the
    /// current status, defaulting to `Draft` for invoices without one.
    pub fn approve_invoice(
        &self,
        uuid: &ObjectId,
        user_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> DomainResult<InvoiceView> {
        let mut invoice = self.load_live(uuid)?;
        let current = invoice.status.as_deref().unwrap_or("Draft");
        validate_invoice_status_transition(current, "Approved")?;
        invoice.status = Some("Approved".to_string());
        invoice.modified_by = user_id.map(str::to_string);
        invoice.modified = Some(now);
        info!(invoice_uuid = %uuid, "invoice approved");
        self.invoices.upsert(invoice.uuid, invoice.clone());
        Ok(self.view_of(invoice))
    }

    /// Soft-delete and stamp the status `Archived`.
    pub fn archive_invoice(
        &self,
        uuid: &ObjectId,
        user_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> DomainResult<InvoiceView> {
        let mut invoice = self.load_live(uuid)?;
        invoice.deleted = true;
        invoice.status = Some("Archived".to_string());
        invoice.modified_by = user_id.map(str::to_string);
        invoice.modified = Some(now);
        info!(invoice_uuid = %uuid, "invoice archived");
        self.invoices.upsert(invoice.uuid, invoice.clone());
        Ok(self.view_of(invoice))
    }

    /// Bring an archived invoice back into the live set. Restored invoices
    /// re-enter the workflow at `Draft`.
    pub fn restore_invoice(
        &self,
        uuid: &ObjectId,
        user_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> DomainResult<InvoiceView> {
        let mut invoice = self
            .invoices
            .get(uuid)
            .ok_or_else(|| DomainError::not_found(DocumentKind::Invoice, *uuid))?;
        invoice.deleted = false;
        if invoice.status.as_deref() == Some("Archived") {
            invoice.status = Some("Draft".to_string());
        }
        invoice.modified_by = user_id.map(str::to_string);
        invoice.modified = Some(now);
        info!(invoice_uuid = %uuid, "invoice restored");
        self.invoices.upsert(invoice.uuid, invoice.clone());
        Ok(self.view_of(invoice))
    }

    /// Soft-delete without touching the status.
    pub fn delete_invoice(
        &self,
        uuid: &ObjectId,
        user_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        let mut invoice = self.load_live(uuid)?;
        invoice.deleted = true;
        invoice.modified_by = user_id.map(str::to_string);
        invoice.modified = Some(now);
        info!(invoice_uuid = %uuid, "invoice deleted");
        self.invoices.upsert(invoice.uuid, invoice);
        Ok(())
    }

    pub fn list_invoices(&self, filters: &InvoiceFilterParams) -> Page<InvoiceView> {
        let mut rows: Vec<Invoice> = self
            .invoices
            .list()
            .into_iter()
            .filter(|inv| !inv.deleted && filters.matches(inv))
            .collect();
        sort_invoices(&mut rows, &filters.sort_by, filters.sort_order);
        let page = filters.page.paginate(rows);
        Page {
            items: page.items.into_iter().map(|inv| self.view_of(inv)).collect(),
            total: page.total,
            page: page.page,
            page_size: page.page_size,
        }
    }

    // ---- invoice items ----------------------------------------------------

    pub fn create_invoice_item(
        &self,
        invoice_uuid: &ObjectId,
        new: NewInvoiceItem,
        now: DateTime<Utc>,
    ) -> DomainResult<InvoiceItem> {
        self.load_live(invoice_uuid)?;
        let item = new.into_item(*invoice_uuid, now);
        debug!(invoice_uuid = %invoice_uuid, item_uuid = %item.uuid, "invoice item created");
        self.items.upsert(item.uuid, item.clone());
        Ok(item)
    }

    pub fn get_invoice_item(&self, uuid: &ObjectId) -> Option<InvoiceItem> {
        self.items.get(uuid)
    }

    pub fn require_invoice_item(&self, uuid: &ObjectId) -> DomainResult<InvoiceItem> {
        self.items
            .get(uuid)
            .ok_or_else(|| DomainError::not_found(DocumentKind::InvoiceItem, *uuid))
    }

    pub fn update_invoice_item(
        &self,
        uuid: &ObjectId,
        patch: InvoiceItemUpdate,
        now: DateTime<Utc>,
    ) -> DomainResult<InvoiceItem> {
        let mut item = self.require_invoice_item(uuid)?;
        patch.apply(&mut item);
        item.modified = Some(now);
        self.items.upsert(item.uuid, item.clone());
        Ok(item)
    }

    /// Hard delete: the row is gone, not flagged.
    pub fn delete_invoice_item(&self, uuid: &ObjectId) -> DomainResult<()> {
        self.items
            .remove(uuid)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found(DocumentKind::InvoiceItem, *uuid))
    }

    pub fn list_invoice_items(&self, invoice_uuid: &ObjectId) -> Vec<InvoiceItem> {
        let mut rows: Vec<InvoiceItem> = self
            .items
            .list()
            .into_iter()
            .filter(|item| item.invoice_uuid == *invoice_uuid)
            .collect();
        sort_items(&mut rows);
        rows
    }

    // ---- invoice groups ---------------------------------------------------

    fn load_live_group(&self, uuid: &ObjectId) -> DomainResult<InvoiceGroup> {
        match self.groups.get(uuid) {
            Some(group) if !group.deleted => Ok(group),
            _ => Err(DomainError::not_found(DocumentKind::InvoiceGroup, *uuid)),
        }
    }

    fn member_invoices(&self, group_uuid: &ObjectId) -> Vec<Invoice> {
        let mut rows: Vec<Invoice> = self
            .invoices
            .list()
            .into_iter()
            .filter(|inv| !inv.deleted && inv.invoice_group_id.as_ref() == Some(group_uuid))
            .collect();
        rows.sort_by(|a, b| a.inv_date.cmp(&b.inv_date));
        rows
    }

    pub fn create_invoice_group(
        &self,
        new: NewInvoiceGroup,
        user_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> InvoiceGroup {
        let group = new.into_group(user_id.map(str::to_string), now);
        info!(group_uuid = %group.uuid, "invoice group created");
        self.groups.upsert(group.uuid, group.clone());
        group
    }

    pub fn get_invoice_group(&self, uuid: &ObjectId) -> Option<InvoiceGroup> {
        self.groups.get(uuid).filter(|g| !g.deleted)
    }

    pub fn require_invoice_group(&self, uuid: &ObjectId) -> DomainResult<InvoiceGroup> {
        self.load_live_group(uuid)
    }

    pub fn get_invoice_group_with_invoices(
        &self,
        uuid: &ObjectId,
    ) -> DomainResult<InvoiceGroupWithInvoices> {
        let group = self.load_live_group(uuid)?;
        let invoices = self.member_invoices(&group.uuid);
        Ok(InvoiceGroupWithInvoices { group, invoices })
    }

    pub fn update_invoice_group(
        &self,
        uuid: &ObjectId,
        patch: InvoiceGroupUpdate,
        user_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> DomainResult<InvoiceGroup> {
        let mut group = self.load_live_group(uuid)?;
        patch.apply(&mut group);
        group.modified_by = user_id.map(str::to_string);
        group.modified = Some(now);
        debug!(group_uuid = %uuid, "invoice group updated");
        self.groups.upsert(group.uuid, group.clone());
        Ok(group)
    }

    pub fn delete_invoice_group(
        &self,
        uuid: &ObjectId,
        user_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        let mut group = self.load_live_group(uuid)?;
        group.deleted = true;
        group.modified_by = user_id.map(str::to_string);
        group.modified = Some(now);
        info!(group_uuid = %uuid, "invoice group deleted");
        self.groups.upsert(group.uuid, group);
        Ok(())
    }

    pub fn add_invoice_to_group(
        &self,
        group_uuid: &ObjectId,
        invoice_uuid: &ObjectId,
        user_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> DomainResult<InvoiceGroupWithInvoices> {
        let group = self.load_live_group(group_uuid)?;
        let mut invoice = self.load_live(invoice_uuid)?;
        invoice.invoice_group_id = Some(group.uuid);
        invoice.modified_by = user_id.map(str::to_string);
        invoice.modified = Some(now);
        info!(group_uuid = %group_uuid, invoice_uuid = %invoice_uuid, "invoice added to group");
        self.invoices.upsert(invoice.uuid, invoice);
        self.get_invoice_group_with_invoices(group_uuid)
    }

    pub fn remove_invoice_from_group(
        &self,
        group_uuid: &ObjectId,
        invoice_uuid: &ObjectId,
        user_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> DomainResult<InvoiceGroupWithInvoices> {
        let group = self.load_live_group(group_uuid)?;
        let mut invoice = self.load_live(invoice_uuid)?;
        if invoice.invoice_group_id != Some(group.uuid) {
            return Err(DomainError::validation(format!(
                "invoice {invoice_uuid} is not a member of group {group_uuid}"
            )));
        }
        invoice.invoice_group_id = None;
        invoice.modified_by = user_id.map(str::to_string);
        invoice.modified = Some(now);
        info!(group_uuid = %group_uuid, invoice_uuid = %invoice_uuid, "invoice removed from group");
        self.invoices.upsert(invoice.uuid, invoice);
        self.get_invoice_group_with_invoices(group_uuid)
    }

    pub fn list_invoice_groups(&self, filters: &InvoiceGroupFilterParams) -> Page<InvoiceGroup> {
        let mut rows: Vec<InvoiceGroup> = self
            .groups
            .list()
            .into_iter()
            .filter(|g| !g.deleted && filters.matches(g))
            .collect();
        sort_groups(&mut rows, &filters.sort_by, filters.sort_order);
        filters.page.paginate(rows)
    }
}
