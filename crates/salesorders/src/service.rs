//! Sales order operations.
//!
//! Sales orders are invoices whose `invoice_type` is one of the sales order
//! types; they share the invoice store and become real invoices by changing
//! that type. Their statuses are descriptive only, so updates skip the
//! workflow check that invoice updates run.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use linguafin_core::{DocumentKind, DomainError, DomainResult, ObjectId, Page};
use linguafin_infra::{DocumentStore, JobDirectory};
use linguafin_workflow::SalesOrderStatus;
use linguafin_invoicing::invoice::{
    Invoice, InvoiceFilterParams, InvoiceUpdate, InvoiceView, NewInvoice, sort_invoices,
};

/// Invoice types that count as sales orders.
pub const SALES_ORDER_TYPES: [&str; 2] = ["Pro Forma", "Sales Order"];

/// The type a transformed sales order becomes by default.
pub const DEFAULT_TRANSFORM_TYPE: &str = "Tax Invoice";

pub fn is_sales_order_type(invoice_type: &str) -> bool {
    SALES_ORDER_TYPES.contains(&invoice_type)
}

/// Sales order statuses are a closed schema set, unlike invoice statuses
/// where legacy free-form values pass through.
fn validate_status_token(token: &str) -> DomainResult<()> {
    if SalesOrderStatus::parse(token).is_some() {
        Ok(())
    } else {
        Err(DomainError::validation(format!(
            "'{token}' is not a sales order status"
        )))
    }
}

/// Options for turning a sales order into an invoice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformRequest {
    /// Target invoice type; defaults to `Tax Invoice`.
    pub invoice_type: Option<String>,
    /// Replacement due date for the resulting invoice.
    pub due_date: Option<DateTime<Utc>>,
}

pub struct SalesOrderService {
    invoices: Arc<dyn DocumentStore<ObjectId, Invoice>>,
    jobs: Arc<dyn JobDirectory>,
}

impl SalesOrderService {
    pub fn new(
        invoices: Arc<dyn DocumentStore<ObjectId, Invoice>>,
        jobs: Arc<dyn JobDirectory>,
    ) -> Self {
        Self { invoices, jobs }
    }

    fn view_of(&self, invoice: Invoice) -> InvoiceView {
        let job_uuid = invoice.job_id.and_then(|id| self.jobs.uuid_for_id(id));
        InvoiceView { invoice, job_uuid }
    }

    /// Load a live record that is still a sales order.
    fn load_live(&self, uuid: &ObjectId) -> DomainResult<Invoice> {
        match self.invoices.get(uuid) {
            Some(inv)
                if !inv.deleted
                    && inv
                        .invoice_type
                        .as_deref()
                        .is_some_and(is_sales_order_type) =>
            {
                Ok(inv)
            }
            _ => Err(DomainError::not_found(DocumentKind::SalesOrder, *uuid)),
        }
    }

    /// Create a sales order. The status defaults to `Draft` and the type to
    /// `Pro Forma`; an explicit type must be a sales order type.
    pub fn create_sales_order(
        &self,
        mut new: NewInvoice,
        user_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> DomainResult<InvoiceView> {
        match new.invoice_type.as_deref() {
            None => new.invoice_type = Some(SALES_ORDER_TYPES[0].to_string()),
            Some(t) if !is_sales_order_type(t) => {
                return Err(DomainError::validation(format!(
                    "'{t}' is not a sales order type; expected one of {SALES_ORDER_TYPES:?}"
                )));
            }
            Some(_) => {}
        }
        match new.status.as_deref() {
            None => new.status = Some(SalesOrderStatus::Draft.as_str().to_string()),
            Some(token) => validate_status_token(token)?,
        }
        let order = new.into_invoice(user_id.map(str::to_string), now);
        info!(so_uuid = %order.uuid, "sales order created");
        self.invoices.upsert(order.uuid, order.clone());
        Ok(self.view_of(order))
    }

    pub fn get_sales_order(&self, uuid: &ObjectId) -> Option<InvoiceView> {
        self.load_live(uuid).ok().map(|inv| self.view_of(inv))
    }

    pub fn require_sales_order(&self, uuid: &ObjectId) -> DomainResult<InvoiceView> {
        self.load_live(uuid).map(|inv| self.view_of(inv))
    }

    /// Partial update. Sales order statuses carry no transition graph, so a
    /// status change only has to name a known status; any edge between known
    /// statuses is written as-is.
    pub fn update_sales_order(
        &self,
        uuid: &ObjectId,
        patch: InvoiceUpdate,
        user_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> DomainResult<InvoiceView> {
        let mut order = self.load_live(uuid)?;
        if let Some(t) = patch.invoice_type.as_deref() {
            if !is_sales_order_type(t) {
                return Err(DomainError::validation(format!(
                    "'{t}' is not a sales order type; use transform to convert to an invoice"
                )));
            }
        }
        if let Some(token) = patch.status.as_deref() {
            validate_status_token(token)?;
        }
        patch.apply(&mut order);
        order.modified_by = user_id.map(str::to_string);
        order.modified = Some(now);
        debug!(so_uuid = %uuid, "sales order updated");
        self.invoices.upsert(order.uuid, order.clone());
        Ok(self.view_of(order))
    }

    pub fn delete_sales_order(
        &self,
        uuid: &ObjectId,
        user_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        let mut order = self.load_live(uuid)?;
        order.deleted = true;
        order.modified_by = user_id.map(str::to_string);
        order.modified = Some(now);
        info!(so_uuid = %uuid, "sales order deleted");
        self.invoices.upsert(order.uuid, order);
        Ok(())
    }

    /// Turn the sales order into an invoice: the record keeps its UUID and
    /// leaves the sales order set by changing type. The resulting invoice
    /// starts its workflow at `Draft`.
    pub fn transform_to_invoice(
        &self,
        uuid: &ObjectId,
        request: TransformRequest,
        user_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> DomainResult<InvoiceView> {
        let mut order = self.load_live(uuid)?;
        let target = request
            .invoice_type
            .unwrap_or_else(|| DEFAULT_TRANSFORM_TYPE.to_string());
        if is_sales_order_type(&target) {
            return Err(DomainError::validation(format!(
                "cannot transform into '{target}': still a sales order type"
            )));
        }
        order.invoice_type = Some(target);
        order.status = Some("Draft".to_string());
        if let Some(due_date) = request.due_date {
            order.due_date = Some(due_date);
        }
        order.modified_by = user_id.map(str::to_string);
        order.modified = Some(now);
        info!(so_uuid = %uuid, invoice_type = order.invoice_type.as_deref(), "sales order transformed to invoice");
        self.invoices.upsert(order.uuid, order.clone());
        Ok(self.view_of(order))
    }

    /// Cancel the sales order, recording the reason in the notes.
    pub fn cancel_sales_order(
        &self,
        uuid: &ObjectId,
        reason: Option<&str>,
        user_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> DomainResult<InvoiceView> {
        let mut order = self.load_live(uuid)?;
        order.status = Some("Cancelled".to_string());
        if let Some(reason) = reason {
            let note = format!("\n[Cancelled: {reason}]");
            match &mut order.notes {
                Some(notes) => notes.push_str(&note),
                None => order.notes = Some(note),
            }
        }
        order.modified_by = user_id.map(str::to_string);
        order.modified = Some(now);
        info!(so_uuid = %uuid, "sales order cancelled");
        self.invoices.upsert(order.uuid, order.clone());
        Ok(self.view_of(order))
    }

    /// List sales orders. Filters apply on top of the sales order type set.
    pub fn list_sales_orders(&self, filters: &InvoiceFilterParams) -> Page<InvoiceView> {
        let mut rows: Vec<Invoice> = self
            .invoices
            .list()
            .into_iter()
            .filter(|inv| {
                !inv.deleted
                    && inv
                        .invoice_type
                        .as_deref()
                        .is_some_and(is_sales_order_type)
                    && filters.matches(inv)
            })
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
}
